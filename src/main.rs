/*
 * Responsibility
 * - tokio runtime startup
 * - call app::run() and nothing else
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    arrow_api::app::run().await
}
