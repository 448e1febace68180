//! Operator-facing banner and status text

use std::io::Write;

use anyhow::{Context, Result};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Display the welcome banner and intro text.
pub fn show_welcome() {
    let mut stdout = StandardStream::stdout(ColorChoice::Always);

    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)));
    let _ = writeln!(
        stdout,
        "\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    );
    let _ = stdout.reset();

    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
    let _ = writeln!(stdout, "\n                P O W E R N U K K I T X");
    let _ = stdout.reset();

    let _ = writeln!(stdout, "\n           Minecraft Bedrock server software");

    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)));
    let _ = writeln!(
        stdout,
        "\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n"
    );
    let _ = stdout.reset();

    let _ = writeln!(stdout, "Welcome to the PowerNukkitX automatic installer.");
    let _ = writeln!(
        stdout,
        "It asks a few questions and sets up an installation that fits your answers.\n"
    );
    let _ = writeln!(stdout, "This can install:");
    let _ = writeln!(stdout, "  • The latest PowerNukkitX release and its libraries");
    let _ = writeln!(stdout, "  • The start script for this platform");
    let _ = writeln!(stdout, "  • A server.properties built from your answers\n");
}

/// Closing summary once a configuration has been written.
pub fn show_configured() {
    let mut stdout = StandardStream::stdout(ColorChoice::Always);

    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    let _ = writeln!(stdout, "\n✓ Server configuration completed");
    let _ = stdout.reset();

    let _ = writeln!(
        stdout,
        "Rerun this installer any time to change the configuration."
    );
    let _ = writeln!(
        stdout,
        "Visit https://docs.powernukkitx.com for more information.\n"
    );
}

/// Block until the operator presses Enter.
pub fn wait_for_enter() -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Always);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)));
    let _ = write!(stdout, "\nPress Enter to start the server...");
    let _ = stdout.reset();
    let _ = stdout.flush();

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(())
}
