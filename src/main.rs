mod app;
mod repo;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the commit graph JSON document exported by the import pipeline.
    #[arg(long)]
    graph_path: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "commitmap",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::CommitMapApp::new(
                cc,
                args.graph_path.clone(),
            )))
        }),
    )
}
