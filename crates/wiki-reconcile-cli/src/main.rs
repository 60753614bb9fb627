use anyhow::{Context, Result};
use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
};
use wiki_reconcile_config::Config;
use wiki_reconcile_engine::{ChangeKind, Patch, ProjectionMode, project_text};

const USAGE: &str = "\
Usage: wiki-reconcile [--config <path>] <command>

Commands:
  project [--stripped] <file>              Print the plain-text rendering
  locate <file> <excerpt>                  Print the markup span rendering the excerpt
  replace <file> <excerpt> <replacement>   Replace the markup rendering the excerpt
  cite <file> <context> <citation>         Insert a citation after the context
  section <file> <title> <content-file>    Replace the body of a section
  segment <original-file> <revised-file>   List the changes between two texts
  init                                     Write the default config file";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Project { file: PathBuf, mode: ProjectionMode },
    Locate { file: PathBuf, excerpt: String },
    Replace { file: PathBuf, excerpt: String, replacement: String },
    Cite { file: PathBuf, context: String, citation: String },
    Section { file: PathBuf, title: String, content_file: PathBuf },
    Segment { original: PathBuf, revised: PathBuf },
    Init,
}

#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    config_path: Option<PathBuf>,
    command: Command,
}

fn parse_args(args: &[String]) -> Option<Invocation> {
    let mut args = args.iter().map(String::as_str);
    let mut config_path = None;

    let mut name = args.next()?;
    if name == "--config" {
        config_path = Some(PathBuf::from(args.next()?));
        name = args.next()?;
    }
    let rest: Vec<&str> = args.collect();

    let command = match (name, rest.as_slice()) {
        ("project", ["--stripped", file]) => Command::Project {
            file: file.into(),
            mode: ProjectionMode::Stripped,
        },
        ("project", [file]) => Command::Project {
            file: file.into(),
            mode: ProjectionMode::Full,
        },
        ("locate", [file, excerpt]) => Command::Locate {
            file: file.into(),
            excerpt: excerpt.to_string(),
        },
        ("replace", [file, excerpt, replacement]) => Command::Replace {
            file: file.into(),
            excerpt: excerpt.to_string(),
            replacement: replacement.to_string(),
        },
        ("cite", [file, context, citation]) => Command::Cite {
            file: file.into(),
            context: context.to_string(),
            citation: citation.to_string(),
        },
        ("section", [file, title, content_file]) => Command::Section {
            file: file.into(),
            title: title.to_string(),
            content_file: content_file.into(),
        },
        ("segment", [original, revised]) => Command::Segment {
            original: original.into(),
            revised: revised.into(),
        },
        ("init", []) => Command::Init,
        _ => return None,
    };

    Some(Invocation {
        config_path,
        command,
    })
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
}

fn resolve_config_path(config_path: Option<&Path>) -> PathBuf {
    match config_path {
        Some(path) => Config::expand_path(path).unwrap_or_else(|| path.to_path_buf()),
        None => Config::config_path(),
    }
}

fn load_config(path: &Path) -> Result<Config> {
    log::info!("Config path: {}", path.display());
    let loaded = Config::load_from_path(path)?;
    Ok(loaded.unwrap_or_else(|| {
        log::info!("No config file found, using defaults");
        Config::default()
    }))
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        eprintln!("Config file already exists at {}", path.display());
        process::exit(1);
    }
    Config::default().save_to_path(path)?;
    log::info!("Wrote default config to {}", path.display());
    Ok(())
}

fn run(invocation: Invocation) -> Result<()> {
    let config_path = resolve_config_path(invocation.config_path.as_deref());
    let config = match invocation.command {
        Command::Init => Config::default(),
        _ => load_config(&config_path)?,
    };
    let locator = config.locator();

    match invocation.command {
        Command::Project { file, mode } => {
            print!("{}", project_text(&read(&file)?, mode));
        }
        Command::Locate { file, excerpt } => {
            let markup = read(&file)?;
            match locator.locate(&excerpt, &markup) {
                Some(m) => {
                    println!(
                        "{}..{} ({:?})",
                        m.markup_start, m.markup_end, m.strategy
                    );
                    println!("{}", m.slice(&markup));
                }
                None => {
                    eprintln!("Excerpt not found");
                    process::exit(1);
                }
            }
        }
        Command::Replace {
            file,
            excerpt,
            replacement,
        } => {
            let patch = Patch::replace(excerpt, replacement);
            print!("{}", patch.apply_with(&locator, &read(&file)?));
        }
        Command::Cite {
            file,
            context,
            citation,
        } => {
            let patch = Patch::citation(context, citation);
            print!("{}", patch.apply_with(&locator, &read(&file)?));
        }
        Command::Section {
            file,
            title,
            content_file,
        } => {
            let patch = Patch::section(title, read(&content_file)?);
            print!("{}", patch.apply_with(&locator, &read(&file)?));
        }
        Command::Segment { original, revised } => {
            let changes = config
                .segmenter()
                .segment(&read(&original)?, &read(&revised)?);
            for change in changes {
                let context = match change.kind {
                    ChangeKind::Insert => &change.rev_context,
                    ChangeKind::Delete | ChangeKind::Replace => &change.orig_context,
                };
                println!(
                    "{:?} {}..{} -> {}..{}",
                    change.kind,
                    change.orig_span.start,
                    change.orig_span.end,
                    change.rev_span.start,
                    change.rev_span.end
                );
                println!("  {}", context.replace('\n', "\n  "));
            }
        }
        Command::Init => init_config(&config_path)?,
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(invocation) = parse_args(&args) else {
        eprintln!("{USAGE}");
        process::exit(1);
    };

    run(invocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_project_modes() {
        let stripped = parse_args(&args(&["project", "--stripped", "a.wiki"])).unwrap();
        assert_eq!(
            stripped.command,
            Command::Project {
                file: "a.wiki".into(),
                mode: ProjectionMode::Stripped
            }
        );

        let full = parse_args(&args(&["project", "a.wiki"])).unwrap();
        assert_eq!(
            full.command,
            Command::Project {
                file: "a.wiki".into(),
                mode: ProjectionMode::Full
            }
        );
    }

    #[test]
    fn parses_config_flag_before_command() {
        let invocation =
            parse_args(&args(&["--config", "/tmp/c.toml", "locate", "a.wiki", "Sun"])).unwrap();
        assert_eq!(invocation.config_path, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(
            invocation.command,
            Command::Locate {
                file: "a.wiki".into(),
                excerpt: "Sun".into()
            }
        );
    }

    #[test]
    fn parses_init_with_config_flag() {
        let invocation = parse_args(&args(&["--config", "~/wr.toml", "init"])).unwrap();
        assert_eq!(invocation.command, Command::Init);
        assert_eq!(parse_args(&args(&["init", "extra"])), None);
    }

    #[test]
    fn config_path_defaults_to_user_config_dir() {
        let path = resolve_config_path(Some(Path::new("/tmp/wr.toml")));
        assert_eq!(path, PathBuf::from("/tmp/wr.toml"));
        assert_eq!(resolve_config_path(None), Config::config_path());
    }

    #[test]
    fn init_writes_a_loadable_default_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init_config(&path).unwrap();

        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn rejects_bad_arity_and_unknown_commands() {
        assert_eq!(parse_args(&args(&[])), None);
        assert_eq!(parse_args(&args(&["replace", "a.wiki", "x"])), None);
        assert_eq!(parse_args(&args(&["frobnicate", "a.wiki"])), None);
        assert_eq!(parse_args(&args(&["--config"])), None);
    }
}
