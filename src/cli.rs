use std::path::PathBuf;

use clap::{Parser, Subcommand};
use futures::TryStreamExt;
use snafu::ResultExt;
use tokio::io::AsyncWriteExt;

use crate::error::{DirectoryDeletionNotRecursiveSnafu, JsonSnafu, NotFoundSnafu, Result};
use crate::storage::StorageClient;
use crate::storage::metadata::{FileRecord, Visibility, WriteOptions};
use crate::storage::operations::list::{EntryLine, ListOptions};
use crate::storage::utils::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "filerfs",
    version,
    about = "Filesystem-style access to a SeaweedFS filer"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List directory contents
    Ls {
        /// Directory to list (defaults to the root)
        #[arg(default_value = "")]
        path: String,
        /// List all nested directories as well
        #[arg(short = 'R', long)]
        recursive: bool,
        /// Show type, size and mime type
        #[arg(short = 'l', long)]
        long: bool,
        /// Leave directory entries out of the output
        #[arg(long)]
        files_only: bool,
        /// Print the entries as a JSON array
        #[arg(long, conflicts_with = "long")]
        json: bool,
    },
    /// Print a file to stdout
    Cat { path: String },
    /// Show normalized metadata for a path
    Stat {
        path: String,
        /// Print a single JSON object
        #[arg(long, conflicts_with = "raw")]
        json: bool,
        /// Print a single key=value line
        #[arg(long)]
        raw: bool,
    },
    /// Show the mime type of a file, falling back to the filer's content type
    Mime { path: String },
    /// Upload a local file
    Put {
        local: PathBuf,
        remote: String,
        /// Mime type to record with the file
        #[arg(long)]
        mime_type: Option<String>,
        /// public or private
        #[arg(long, value_parser = parse_visibility)]
        visibility: Option<Visibility>,
        /// Unix timestamp to record instead of the current time
        #[arg(long)]
        timestamp: Option<i64>,
    },
    /// Create a directory (no-op if it already exists)
    Mkdir { path: String },
    /// Remove a file, or a directory tree with -R
    Rm {
        path: String,
        #[arg(short = 'R', long)]
        recursive: bool,
    },
    /// Copy a file
    Cp { src: String, dest: String },
    /// Move a file (copy, then delete the source)
    Mv { src: String, dest: String },
    /// Change the visibility of a file
    Chmod {
        #[arg(value_parser = parse_visibility)]
        visibility: Visibility,
        path: String,
    },
    /// Exit successfully if the path exists
    Exists { path: String },
}

fn parse_visibility(raw: &str) -> std::result::Result<Visibility, String> {
    raw.parse::<Visibility>().map_err(|e| e.to_string())
}

pub async fn run(args: Args, client: StorageClient) -> Result<()> {
    match args.command {
        Command::Ls {
            path,
            recursive,
            long,
            files_only,
            json,
        } => {
            let mut options = ListOptions::default().recursive(recursive);
            if files_only {
                options = options.files_only();
            }
            let entries = client.list_contents(&path, &options).await;
            if json {
                println!("{}", serde_json::to_string(&entries).context(JsonSnafu)?);
            } else {
                for entry in &entries {
                    if long {
                        println!("{}", EntryLine(entry));
                    } else {
                        println!("{}", entry.path);
                    }
                }
            }
        }
        Command::Cat { path } => {
            let mut stream = client.read_stream(&path).await?.into_stream();
            let mut stdout = tokio::io::stdout();
            while let Some(chunk) = stream.try_next().await? {
                stdout.write_all(&chunk).await?;
            }
            stdout.flush().await?;
        }
        Command::Stat { path, json, raw } => {
            let format = if json {
                OutputFormat::Json
            } else if raw {
                OutputFormat::Raw
            } else {
                OutputFormat::Human
            };
            let record = client.get_metadata(&path).await?;
            print_record(&record, format)?;
        }
        Command::Mime { path } => {
            let record = client.get_mimetype(&path).await?;
            match record.mime_type {
                Some(mime_type) => println!("{mime_type}"),
                None => println!("-"),
            }
        }
        Command::Put {
            local,
            remote,
            mime_type,
            visibility,
            timestamp,
        } => {
            let contents = tokio::fs::read(&local).await?;
            let options = WriteOptions {
                timestamp,
                visibility,
                mime_type,
            };
            let record = client.write(&remote, contents, &options).await?;
            println!("Uploaded: {} → {}", local.display(), record.path);
        }
        Command::Mkdir { path } => {
            let record = client.create_dir(&path, &WriteOptions::default()).await?;
            println!("Directory: {}", record.path);
        }
        Command::Rm { path, recursive } => {
            if recursive {
                client.delete_dir(&path).await?;
            } else {
                let record = client.get_metadata(&path).await?;
                if record.is_dir() {
                    return DirectoryDeletionNotRecursiveSnafu { path }.fail();
                }
                client.delete(&path).await?;
            }
            println!("Deleted: {path}");
        }
        Command::Cp { src, dest } => {
            let record = client.copy(&src, &dest).await?;
            println!("Copied: {src} → {}", record.path);
        }
        Command::Mv { src, dest } => {
            client.rename(&src, &dest).await?;
            println!("Moved: {src} → {dest}");
        }
        Command::Chmod { visibility, path } => {
            let record = client.set_visibility(&path, visibility).await?;
            println!("{}", record);
        }
        Command::Exists { path } => {
            if !client.has(&path).await? {
                return NotFoundSnafu { path }.fail();
            }
            println!("{path}");
        }
    }
    Ok(())
}

fn print_record(record: &FileRecord, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(record).context(JsonSnafu)?);
        }
        OutputFormat::Raw => println!("{record}"),
        OutputFormat::Human => {
            println!("path: {}", record.path);
            println!("type: {}", record.kind.as_str());
            if let Some(size) = record.size {
                println!("size: {size}");
            }
            if let Some(visibility) = record.visibility {
                println!("visibility: {visibility}");
            }
            if let Some(mime_type) = &record.mime_type {
                println!("mimetype: {mime_type}");
            }
            println!("timestamp: {}", record.timestamp);
        }
    }
    Ok(())
}
