/// The xtask binary delegates entirely to nih_plug_xtask, which provides
/// the `bundle` subcommand. Usage:
///
///   cargo xtask bundle pdlboard --release
///
/// This compiles the pedalboard as a cdylib and packages it into
/// `target/bundled/PDLBOARD.vst3` and `target/bundled/PDLBOARD.clap`.
fn main() -> nih_plug_xtask::Result<()> {
    nih_plug_xtask::main()
}
