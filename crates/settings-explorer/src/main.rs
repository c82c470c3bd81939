use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use settings_explorer::{catalog, Explorer, ExplorerConfig, MemoryStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn common_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Catalog file (.json, .toml, .yaml)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Explorer configuration file (TOML)"),
        )
}

fn cli() -> Command {
    Command::new("settings-explorer")
        .version(settings_explorer::VERSION)
        .about("Browse and edit a hierarchical settings catalog")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(common_args(
            Command::new("tree").about("Print the compressed settings tree"),
        ))
        .subcommand(common_args(
            Command::new("show")
                .about("Show the properties of one setting")
                .arg(Arg::new("key").required(true).help("Setting identifier"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        ))
        .subcommand(common_args(
            Command::new("set")
                .about("Write a new value")
                .arg(Arg::new("key").required(true).help("Setting identifier"))
                .arg(Arg::new("value").required(true).help("New value")),
        ))
        .subcommand(common_args(
            Command::new("invoke")
                .about("Run a verb of a setting")
                .arg(Arg::new("key").required(true).help("Setting identifier"))
                .arg(
                    Arg::new("verb")
                        .default_value("Invoke")
                        .help("Verb name"),
                ),
        ))
        .subcommand(common_args(
            Command::new("filter")
                .about("List node keys containing a pattern")
                .arg(Arg::new("pattern").required(true).help("Case-insensitive pattern")),
        ))
}

fn open(args: &ArgMatches) -> anyhow::Result<Explorer> {
    let config = match args.get_one::<PathBuf>("config") {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };
    let path = args
        .get_one::<PathBuf>("catalog")
        .context("missing --catalog")?;
    let store: Arc<MemoryStore> = Arc::new(catalog::load_store(path)?);
    Ok(Explorer::load(store.as_ref(), store.clone(), config)?)
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument <{name}>"))
}

fn print_tree(explorer: &Explorer) {
    for entry in explorer.tree().outline() {
        let marker = match explorer.kind_of(&entry.key) {
            Some(kind) => format!(" [{kind}]"),
            None => String::new(),
        };
        println!("{}{}{}", "  ".repeat(entry.depth), entry.label, marker);
    }
    for skipped in explorer.tree().skipped() {
        eprintln!("skipped: {skipped}");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("tree", args)) => {
            let explorer = open(args)?;
            print_tree(&explorer);
        }
        Some(("show", args)) => {
            let explorer = open(args)?;
            let sheet = explorer.properties(required(args, "key")?)?;
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&sheet)?);
            } else {
                print!("{sheet}");
            }
        }
        Some(("set", args)) => {
            let explorer = open(args)?;
            let key = required(args, "key")?;
            explorer.set_value(key, required(args, "value")?)?;
            print!("{}", explorer.properties(key)?);
        }
        Some(("invoke", args)) => {
            let explorer = open(args)?;
            let key = required(args, "key")?;
            let verb = required(args, "verb")?;
            explorer.invoke(key, verb)?;
            println!("{key}: {verb} done");
        }
        Some(("filter", args)) => {
            let explorer = open(args)?;
            for key in explorer.filter(required(args, "pattern")?) {
                println!("{key}");
            }
        }
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(())
}
