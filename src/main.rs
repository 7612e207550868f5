use clap::Parser;
use word2pdf::{Cli, OutputFormatter, OutputMode, Word2PdfError, WordToPdf};

fn main() {
    let cli = Cli::parse();

    let app = match WordToPdf::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return;
        }
    };

    // Failures are reported on the console; the exit code stays 0.
    let _report = app.run();
}

fn print_startup_error(error: &Word2PdfError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 1, false);
    formatter.print_user_friendly_error(error);
}
