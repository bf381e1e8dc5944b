//! Upload training data and start a fine-tune.
//!
//! This example shows how to:
//! - Upload a JSONL file as multipart form data
//! - Start a fine-tune job on the uploaded file
//! - Poll the job's events until it leaves the pending/running states
//!
//! # Running
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."
//! cargo run --example upload_and_fine_tune -- path/to/train.jsonl
//! ```

use openai_client::{ClientConfig, FileCreate, FineTuneCreate, ModelId, OpenAIClient};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .expect("OPENAI_API_KEY environment variable must be set");
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "train.jsonl".to_string());

    let client = OpenAIClient::new(ClientConfig::new(api_key).with_max_retries(3))?;

    let upload = FileCreate::from_path(&path, "fine-tune").await?;
    let file = client.upload_file(&upload).await?;
    println!("Uploaded {} as {} ({} bytes)", file.filename, file.id, file.bytes);

    let request = FineTuneCreate::new(file.id.clone())
        .model(ModelId::new("curie")?)
        .n_epochs(2)
        .suffix("demo");
    let job = client.create_fine_tune(&request).await?;
    println!("Started fine-tune {} ({})", job.id, job.status);

    let mut seen = 0;
    loop {
        let events = client.list_fine_tune_events(&job.id).await?;
        for event in events.data.iter().skip(seen) {
            println!("  [{}] {}", event.level, event.message);
        }
        seen = events.len();

        let current = client.retrieve_fine_tune(&job.id).await?;
        if current.status != "pending" && current.status != "running" {
            println!("Finished with status {}", current.status);
            if let Some(model) = current.fine_tuned_model {
                println!("Fine-tuned model: {model}");
            }
            break;
        }
        tokio::time::sleep(Duration::from_secs(30)).await;
    }

    Ok(())
}
