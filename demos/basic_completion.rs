//! Basic completion and chat example.
//!
//! This example shows how to:
//! - Create a client configuration with a couple of retries
//! - Send a text completion and a chat completion
//! - Inspect token usage
//!
//! # Running
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."
//! cargo run --example basic_completion
//! ```

use openai_client::{
    ChatCompletionCreate, ChatMessage, ClientConfig, CompletionCreate, ModelId, OpenAIClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .expect("OPENAI_API_KEY environment variable must be set");

    // Two retries on rate limits and server errors
    let client = OpenAIClient::new(ClientConfig::new(api_key).with_max_retries(2))?;

    let completion = CompletionCreate::new(ModelId::new("text-davinci-003")?)
        .prompt("Say this is a test")
        .max_tokens(16)
        .temperature(0.0);

    println!("Sending completion request...");
    let response = client.create_completion(&completion).await?;
    for choice in &response.choices {
        println!("  [{}] {}", choice.index, choice.text.trim());
    }
    if let Some(usage) = &response.usage {
        println!(
            "Tokens: {} prompt + {:?} completion = {} total",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }

    let chat = ChatCompletionCreate::new(
        ModelId::new("gpt-3.5-turbo")?,
        vec![
            ChatMessage::system("You are a helpful assistant. Be concise."),
            ChatMessage::user("What is the capital of France? Answer in one sentence."),
        ],
    );

    println!("\nSending chat request...");
    match client.create_chat_completion(&chat).await {
        Ok(response) => println!("Response: {}", response.first_content().unwrap_or_default()),
        Err(err) => {
            if let Some(api) = err.api_error() {
                eprintln!("Service rejected the request: {api}");
            } else {
                eprintln!("{}", err.user_message());
            }
        }
    }

    Ok(())
}
