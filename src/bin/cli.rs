use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use pgscribe::introspect::ColumnSummary;
use pgscribe::logging::init_logging;
use pgscribe::synth::{DdlOptions, ForeignKeyStyle};
use pgscribe::{Credentials, PgConnector, SchemaService, ServiceOptions};

const HISTORY_FILE: &str = ".scribeql_history";

#[derive(Parser)]
#[command(author, version, about = "scribeql - inspect a PostgreSQL database and print DDL/DML for its tables")]
struct Cli {
    /// Database server host
    #[arg(long, env = "PGHOST", default_value = "localhost")]
    host: String,

    /// Database server port
    #[arg(short, long, env = "PGPORT", default_value_t = 5432)]
    port: u16,

    /// Database name
    #[arg(short, long, env = "PGDATABASE", default_value = "postgres")]
    database: String,

    /// User name
    #[arg(short = 'U', long, env = "PGUSER", default_value = "postgres")]
    username: String,

    /// Password
    #[arg(long, env = "PGPASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Per-query timeout in seconds
    #[arg(long, default_value_t = 30)]
    query_timeout_secs: u64,

    /// Fold multi-column foreign keys into one clause
    #[arg(long)]
    composite_foreign_keys: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shell
    Shell,

    /// List the visible schemas
    Schemas,

    /// List tables, optionally filtered by a search term
    Tables {
        /// Matched against table names, column names and column comments
        search: Option<String>,
    },

    /// Describe the columns of a table
    Columns {
        table: String,
    },

    /// Print the CREATE TABLE statement for a table
    Ddl {
        table: String,
    },

    /// Print INSERT statements for rows of a table
    Dml {
        table: String,

        /// Maximum number of rows
        #[arg(short, long, default_value_t = 100)]
        limit: u32,
    },
}

impl Cli {
    fn credentials(&self) -> Credentials {
        Credentials {
            host: self.host.clone(),
            port: self.port,
            database: self.database.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            query_timeout: Duration::from_secs(self.query_timeout_secs.max(1)),
            ddl: DdlOptions {
                foreign_keys: if self.composite_foreign_keys {
                    ForeignKeyStyle::Composite
                } else {
                    ForeignKeyStyle::PerColumn
                },
            },
            ..ServiceOptions::default()
        }
    }
}

/// Connect and adopt the visible schemas as scope
async fn open(service: &SchemaService, credentials: &Credentials) -> Result<()> {
    service
        .connect(credentials)
        .await
        .with_context(|| format!("Failed to connect to {}", credentials.describe()))?;
    service.resolve_schemas().await.context("Failed to resolve schemas")?;
    Ok(())
}

async fn run_command(service: &SchemaService, command: &Commands) -> Result<()> {
    match command {
        Commands::Shell => anyhow::bail!("the shell cannot be started from inside the shell"),
        Commands::Schemas => {
            for schema in service.resolve_schemas().await? {
                println!("{}", schema);
            }
        }
        Commands::Tables { search } => {
            for table in service.list_tables(search.as_deref()).await? {
                println!("{}", table);
            }
        }
        Commands::Columns { table } => {
            display_columns(&service.columns(table).await?);
        }
        Commands::Ddl { table } => {
            println!("{}", service.ddl(table).await?);
        }
        Commands::Dml { table, limit } => {
            let output = service.dml(table, Some(*limit)).await?;
            print!("{}", output.dml);
            println!("-- {} rows", output.row_count);
        }
    }
    Ok(())
}

async fn run_shell(service: &SchemaService, mut credentials: Credentials) -> Result<()> {
    println!("Welcome to scribeql. Type 'help' for assistance or 'exit' to quit.");

    match open(service, &credentials).await {
        Ok(()) => println!("Connected to {}", credentials.describe()),
        Err(err) => println!("Error: {:#}", err),
    }

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    if let Err(err) = rl.load_history(HISTORY_FILE) {
        if !matches!(err, ReadlineError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound) {
            println!("Error loading history: {}", err);
        }
    }

    loop {
        let line = match rl.readline("scribeql> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {}", err);
                break;
            }
        };
        let _ = rl.add_history_entry(line.as_str());

        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        let result = match command.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("Goodbye!");
                break;
            }
            "help" => {
                print_help();
                Ok(())
            }
            "connect" => {
                if let Some(database) = args.first() {
                    credentials.database = database.to_string();
                }
                open(service, &credentials)
                    .await
                    .map(|()| println!("Connected to {}", credentials.describe()))
            }
            "disconnect" => {
                service.disconnect().await;
                println!("Disconnected");
                Ok(())
            }
            "schemas" => run_command(service, &Commands::Schemas).await,
            "tables" => {
                let search = (!args.is_empty()).then(|| args.join(" "));
                run_command(service, &Commands::Tables { search }).await
            }
            "columns" | "ddl" | "dml" => match args.first() {
                None => {
                    println!("Usage: {} <table>", command);
                    Ok(())
                }
                Some(table) => {
                    let table = table.to_string();
                    let cmd = match command.to_lowercase().as_str() {
                        "columns" => Ok(Commands::Columns { table }),
                        "ddl" => Ok(Commands::Ddl { table }),
                        _ => match args.get(1).map(|l| l.parse::<u32>()).transpose() {
                            Ok(limit) => Ok(Commands::Dml {
                                table,
                                limit: limit.unwrap_or(service.options().default_row_limit),
                            }),
                            Err(err) => Err(anyhow::anyhow!("invalid limit: {}", err)),
                        },
                    };
                    match cmd {
                        Ok(cmd) => run_command(service, &cmd).await,
                        Err(err) => Err(err),
                    }
                }
            },
            other => {
                println!("Unknown command: {}. Type 'help' for the command list.", other);
                Ok(())
            }
        };

        if let Err(err) = result {
            println!("Error: {:#}", err);
        }
    }

    if let Err(err) = rl.save_history(HISTORY_FILE) {
        println!("Error saving history: {}", err);
    }
    service.disconnect().await;
    Ok(())
}

fn print_help() {
    println!("Available commands:");
    println!("  connect [database]            - Reconnect, optionally to another database");
    println!("  disconnect                    - Close the connection");
    println!("  schemas                       - List visible schemas and use them as scope");
    println!("  tables [term]                 - List tables, filtered by name, column or comment");
    println!("  columns <table>               - Describe the columns of a table");
    println!("  ddl <table>                   - Print CREATE TABLE and column comments");
    println!("  dml <table> [limit]           - Print INSERT statements for up to limit rows");
    println!();
    println!("Other commands:");
    println!("  help                          - Display this help message");
    println!("  exit                          - Exit the shell");
}

fn column_cells(column: &ColumnSummary) -> Vec<String> {
    vec![
        column.name.clone(),
        column.data_type.clone(),
        column.key.clone(),
        column.null.clone(),
        column.default.clone().unwrap_or_default(),
        column.comment.clone().unwrap_or_default(),
    ]
}

fn format_columns(columns: &[ColumnSummary]) -> String {
    let headers = ["name", "type", "key", "null", "default", "comment"];
    let rows: Vec<Vec<String>> = columns.iter().map(column_cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len().max(3)).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::from("|");
    for (header, width) in headers.iter().zip(&widths) {
        out.push_str(&format!(" {:<width$} |", header, width = *width));
    }
    out.push_str("\n+");
    for width in &widths {
        out.push_str(&format!("{:-<width$}+", "", width = width + 2));
    }
    out.push('\n');
    for row in &rows {
        out.push('|');
        for (cell, width) in row.iter().zip(&widths) {
            out.push_str(&format!(" {:<width$} |", cell, width = *width));
        }
        out.push('\n');
    }
    out.push_str(&format!("({} rows)", rows.len()));
    out
}

fn display_columns(columns: &[ColumnSummary]) {
    println!("{}", format_columns(columns));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let service = SchemaService::new(Arc::new(PgConnector::default()), cli.service_options());
    let credentials = cli.credentials();

    match &cli.command {
        None | Some(Commands::Shell) => run_shell(&service, credentials).await?,
        Some(command) => {
            open(&service, &credentials).await?;
            let result = run_command(&service, command).await;
            service.disconnect().await;
            result?;
        }
    }

    Ok(())
}
