// Test modules for openai-client
//
// Each source module has a corresponding test module that focuses on
// behaviour rather than implementation details.

// Test helper utilities
pub mod helpers;

pub mod resources;
