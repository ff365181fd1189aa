use std::fs;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::Shell;

// cli.rs only depends on clap + clap_complete (both build-dependencies),
// so including it here compiles without the rest of the crate.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = std::env::var_os("OUT_DIR").expect("OUT_DIR not set by Cargo");
    let out_dir = Path::new(&out_dir);

    render_manpages(out_dir);
    render_completions(out_dir);
}

/// Render `forticfg.1`, `forticfg-list.1`, ... into `$OUT_DIR/man`,
/// walking the whole subcommand tree.
fn render_manpages(out_dir: &Path) {
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("failed to create man output directory");

    fn render(cmd: &clap::Command, dir: &Path) {
        let name = cmd.get_name().to_owned();

        let mut buf = Vec::new();
        clap_mangen::Man::new(cmd.clone())
            .render(&mut buf)
            .unwrap_or_else(|e| panic!("failed to render man page for `{name}`: {e}"));
        let path = dir.join(format!("{name}.1"));
        fs::write(&path, buf)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));

        for sub in cmd.get_subcommands() {
            if sub.is_hide_set() {
                continue;
            }
            let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
            render(&sub, dir);
        }
    }

    render(&cli::Cli::command(), &man_dir);
}

/// Pre-render completion scripts into `$OUT_DIR/completions` so packagers
/// can install them without invoking the binary.
fn render_completions(out_dir: &Path) {
    let comp_dir = out_dir.join("completions");
    fs::create_dir_all(&comp_dir).expect("failed to create completions directory");

    let mut cmd = cli::Cli::command();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        clap_complete::generate_to(shell, &mut cmd, "forticfg", &comp_dir)
            .unwrap_or_else(|e| panic!("failed to generate {shell} completions: {e}"));
    }
}
