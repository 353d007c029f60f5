use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use charmask::{CharMask, KeyFile, Options};
use clap::{Parser, Subcommand};

/// charmask - reversible character masking
///
/// Build pools of substitution tables, mask and unmask text with them, and
/// move the key material between machines as key files.
#[derive(Parser)]
#[command(name = "charmask")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a mapping pool and write it to a key file
    Keygen {
        /// Number of mapping objects to build
        #[arg(long, short, default_value_t = 100)]
        size: usize,

        /// Character sets to draw from (comma separated registry names)
        #[arg(long, value_delimiter = ',', default_values_t = ["tr".to_string(), "number".to_string()])]
        charset: Vec<String>,

        /// Explicit character pool, overrides --charset
        #[arg(long)]
        chars: Option<String>,

        /// Where to write the key file
        #[arg(long, short, default_value = "charmask.key")]
        output: PathBuf,
    },

    /// Mask a file (or stdin with '-') through a key file's pool
    Encrypt {
        /// Input path, '-' for stdin
        input: PathBuf,

        /// Key file holding the mapping pool
        #[arg(long, short)]
        key: PathBuf,

        /// Mapping id to use (defaults to the first in the pool)
        #[arg(long)]
        id: Option<String>,
    },

    /// Unmask a file (or stdin with '-') through a key file's pool
    Decrypt {
        /// Input path, '-' for stdin
        input: PathBuf,

        /// Key file holding the mapping pool
        #[arg(long, short)]
        key: PathBuf,

        /// Mapping id to use (defaults to the first in the pool)
        #[arg(long)]
        id: Option<String>,
    },

    /// List the mapping ids in a key file
    Ids {
        /// Key file holding the mapping pool
        #[arg(long, short)]
        key: PathBuf,
    },

    /// Show version information
    Version,
}

fn read_key_file(path: &PathBuf) -> Result<KeyFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read key file {:?}", path))?;
    let key_file: KeyFile =
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse key file {:?}", path))?;

    if !key_file.verify() {
        anyhow::bail!("Key file {:?} failed its integrity check", path);
    }

    Ok(key_file)
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read input {:?}", path))
    }
}

fn handle_keygen(
    size: usize,
    charset: Vec<String>,
    chars: Option<String>,
    output: PathBuf,
) -> Result<()> {
    let options = Options {
        size,
        character_set: charset,
        characters: chars.map(|s| s.chars().collect()),
        mapping_objects: None,
    };

    let mask = CharMask::new(options);
    if mask.ids().is_empty() {
        anyhow::bail!(
            "No valid characters available, nothing to build (known sets: {})",
            charmask::charsets::names().collect::<Vec<_>>().join(", ")
        );
    }

    let key_file = KeyFile::new(mask.export_objects().to_vec());
    let yaml = serde_yaml::to_string(&key_file).context("Failed to serialize key file")?;
    fs::write(&output, yaml).with_context(|| format!("Failed to write key file {:?}", output))?;

    println!("✓ Built {} mapping objects", mask.ids().len());
    println!("✓ Key file: {:?}", output);

    Ok(())
}

fn handle_transform(input: PathBuf, key: PathBuf, id: Option<String>, decrypt: bool) -> Result<()> {
    let key_file = read_key_file(&key)?;
    let mask = CharMask::new(Options {
        mapping_objects: Some(key_file.objects),
        ..Options::default()
    });

    let text = read_input(&input)?;
    let outcome = if decrypt {
        mask.decrypt(&text, id.as_deref())
    } else {
        mask.encrypt(&text, id.as_deref())
    };

    if let Some(error) = outcome.error {
        anyhow::bail!("{error}");
    }

    print!("{}", outcome.value);
    Ok(())
}

fn handle_ids(key: PathBuf) -> Result<()> {
    let key_file = read_key_file(&key)?;

    for id in key_file.objects.iter().map(|object| &object.id) {
        println!("{id}");
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen {
            size,
            charset,
            chars,
            output,
        } => handle_keygen(size, charset, chars, output),
        Commands::Encrypt { input, key, id } => handle_transform(input, key, id, false),
        Commands::Decrypt { input, key, id } => handle_transform(input, key, id, true),
        Commands::Ids { key } => handle_ids(key),
        Commands::Version => {
            println!("charmask {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
