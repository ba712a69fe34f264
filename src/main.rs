use anyhow::Result;
use clap::{Parser, Subcommand};

use utilkit_core::config::{self, Config};
use utilkit_core::util::{self, env, jst, sanitize, text, urlpath};

const DEFAULT_JST_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Parser)]
#[command(
    name = "utilkit",
    about = "utilkit - env, I/O, URL, text and JST helpers",
    version = utilkit_core::VERSION,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip emoji, normalize whitespace and optionally truncate text
    Clean {
        /// Input file (stdin if omitted)
        #[arg(short, long, default_value = "")]
        input: String,
        /// Output file (stdout if omitted)
        #[arg(short, long, default_value = "")]
        output: String,
        /// Maximum length in characters (0 disables truncation)
        #[arg(long)]
        max_len: Option<usize>,
        /// Suffix appended when truncating
        #[arg(long)]
        suffix: Option<String>,
        /// Keep emoji, only normalize whitespace
        #[arg(long)]
        keep_emojis: bool,
    },
    /// Print each item of a comma-separated list on its own line
    Split {
        /// Comma-separated list
        list: String,
    },
    /// Print the storage key name for a repository URL
    Key {
        /// Repository URL
        url: String,
    },
    /// Print the local cache path for a repository URL
    Path {
        /// Repository URL
        url: String,
        /// Subdirectory of the temp dir (defaults to config)
        #[arg(long)]
        dir_name: Option<String>,
        /// Create the directory
        #[arg(long)]
        create: bool,
    },
    /// Print the owner/repo path of a repository URL
    RepoPath {
        /// Repository URL
        url: String,
    },
    /// Check whether a service URL is secure (exits 1 if not)
    Secure {
        /// Service URL
        url: String,
    },
    /// Print the current JST time, or reformat a JST time string
    Jst {
        /// Output format (strftime)
        #[arg(short, long, default_value = DEFAULT_JST_FORMAT)]
        format: String,
        /// Time string to parse as JST
        #[arg(short, long, requires = "layout")]
        parse: Option<String>,
        /// Layout (strftime) of the --parse string
        #[arg(short, long)]
        layout: Option<String>,
    },
    /// Print an environment variable with a default
    Env {
        /// Variable name
        key: String,
        /// Value used when the variable is unset
        #[arg(short, long, default_value = "")]
        default: String,
        /// Interpret the value as a boolean
        #[arg(long = "bool")]
        as_bool: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("utilkit=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config_from_env();

    match cli.command {
        Commands::Clean {
            input,
            output,
            max_len,
            suffix,
            keep_emojis,
        } => cmd_clean(&cfg, &input, &output, max_len, suffix, keep_emojis)?,
        Commands::Split { list } => cmd_split(&list),
        Commands::Key { url } => println!("{}", sanitize::generate_key_name(&url)),
        Commands::Path {
            url,
            dir_name,
            create,
        } => cmd_path(&cfg, &url, dir_name, create)?,
        Commands::RepoPath { url } => println!("{}", urlpath::get_repository_path(&url)),
        Commands::Secure { url } => {
            if !cmd_secure(&cfg, &url) {
                std::process::exit(1);
            }
        }
        Commands::Jst {
            format,
            parse,
            layout,
        } => cmd_jst(&format, parse, layout)?,
        Commands::Env {
            key,
            default,
            as_bool,
        } => cmd_env(&key, &default, as_bool),
    }

    Ok(())
}

fn cmd_clean(
    cfg: &Config,
    input: &str,
    output: &str,
    max_len: Option<usize>,
    suffix: Option<String>,
    keep_emojis: bool,
) -> Result<()> {
    let raw = util::read_input(input)?;
    let content = String::from_utf8_lossy(&raw);

    let mut cleaned = if keep_emojis || !cfg.text.strip_emojis {
        text::normalize_spaces(&content)
    } else {
        text::clean_string_from_emojis(&content)
    };

    let max_len = max_len.unwrap_or(cfg.text.max_len);
    if max_len > 0 {
        let suffix = suffix.as_deref().unwrap_or(&cfg.text.truncate_suffix);
        cleaned = text::truncate(&cleaned, max_len, suffix);
    }
    tracing::debug!("Cleaned {} bytes into {} chars", raw.len(), cleaned.chars().count());

    cleaned.push('\n');
    util::write_output(output, cleaned.as_bytes())?;
    Ok(())
}

fn cmd_split(list: &str) {
    for item in text::parse_comma_separated_list(list) {
        println!("{}", item);
    }
}

fn cmd_path(cfg: &Config, url: &str, dir_name: Option<String>, create: bool) -> Result<()> {
    let dir_name = dir_name.unwrap_or_else(|| cfg.repo.dir_name.clone());
    let path = sanitize::sanitize_url_to_unique_path(url, &dir_name);

    if create {
        util::ensure_dir(&path)?;
        tracing::info!("Created {}", path.display());
    }

    println!("{}", path.display());
    Ok(())
}

fn cmd_secure(cfg: &Config, url: &str) -> bool {
    let secure = urlpath::is_secure_service_url_with(url, &cfg.security.local_dev_hosts);
    println!("{}", secure);
    secure
}

fn cmd_jst(format: &str, parse: Option<String>, layout: Option<String>) -> Result<()> {
    let out = match (parse, layout) {
        (Some(input), Some(layout)) => jst::format_jst_string(&input, &layout, format)?,
        _ => jst::format_jst(&jst::now_jst(), format),
    };
    println!("{}", out);
    Ok(())
}

fn cmd_env(key: &str, default: &str, as_bool: bool) {
    if as_bool {
        let default = env::parse_bool(default).unwrap_or(false);
        println!("{}", env::get_env_as_bool(key, default));
    } else {
        println!("{}", env::get_env(key, default));
    }
}
