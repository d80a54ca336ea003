use anyhow::Result;

mod app;
mod features;
mod shared;
mod ui;
mod widgets;


#[tokio::main]
async fn main() -> Result<()> {
    // Load config, storage and the saved list
    let mut app = app::App::new().await?;

    // Run the TUI
    app.run().await?;

    Ok(())
}
