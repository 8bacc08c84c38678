use std::process::ExitCode;

fn main() -> ExitCode {
    dimmer_launcher::native::run()
}
