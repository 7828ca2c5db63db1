use std::process::ExitCode;

fn main() -> ExitCode {
    legal_summarizer::run()
}
