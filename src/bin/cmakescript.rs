//! Binary entry point for the cmakescript CLI.

fn main() {
    cmakescript::cli::run();
}
