//! Command-line front end for the loan and registration stores.
//!
//! # Responsibility
//! - Map subcommands onto `shelf_core` services.
//! - Report domain and storage failures on stderr with a non-zero exit code.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::warn;
use shelf_core::{
    default_log_level, format_date, init_logging, parse_date, ConflictScope, Library, LoanRecord,
    RegistrationRecord, StoreConfig, StoreError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "shelf",
    author,
    version,
    about = "Book loans and new-user registrations",
    long_about = None
)]
struct Cli {
    /// Directory holding both tables (defaults to $SHELF_DATA_DIR, then <temp>/shelf)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Write rolling logs to this directory
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Log level used with --log-dir
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Let a returned book id be issued again
    #[arg(long, global = true)]
    allow_reissue: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue a book to a borrower
    Issue {
        book_id: String,
        title: String,
        issued_to: String,
        /// Issue date, YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Record the return of an issued book
    Return {
        book_id: String,
        /// Return date, YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// List books currently issued
    Outstanding {
        #[arg(long)]
        json: bool,
    },
    /// List every loan, returned or not
    Loans {
        #[arg(long)]
        json: bool,
    },
    /// Register a new user
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        class: String,
        /// Date of birth, YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        dob: NaiveDate,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// List every registration
    Registrations {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug)]
enum CliError {
    Store(StoreError),
    Json(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "failed to encode JSON output: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        if let Err(err) = init_logging(log_level(&cli), absolute(log_dir)) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let config = store_config(&cli);
    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warn!("event=cli_command module=cli status=error error={}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn log_level(cli: &Cli) -> &str {
    cli.log_level.as_deref().unwrap_or(default_log_level())
}

fn store_config(cli: &Cli) -> StoreConfig {
    let config = match &cli.data_dir {
        Some(dir) => StoreConfig::new(dir),
        None => StoreConfig::from_env(),
    };
    if cli.allow_reissue {
        config.with_conflict_scope(ConflictScope::Outstanding)
    } else {
        config
    }
}

fn run(command: Command, config: &StoreConfig) -> Result<(), CliError> {
    let library = Library::open(config);

    match command {
        Command::Issue {
            book_id,
            title,
            issued_to,
            date,
        } => {
            let issue_date = date.unwrap_or_else(today);
            library
                .loans()
                .issue(book_id.as_str(), title, issued_to, issue_date)?;
            println!("issued {book_id} on {}", format_date(issue_date));
        }
        Command::Return { book_id, date } => {
            let return_date = date.unwrap_or_else(today);
            library.loans().return_book(&book_id, return_date)?;
            println!("returned {book_id} on {}", format_date(return_date));
        }
        Command::Outstanding { json } => {
            let loans = library.loans().list_outstanding()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&loans)?);
            } else if loans.is_empty() {
                println!("No books are currently issued.");
            } else {
                loans.iter().for_each(print_loan);
            }
        }
        Command::Loans { json } => {
            let loans = library.loans().load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&loans)?);
            } else {
                loans.iter().for_each(print_loan);
            }
        }
        Command::Register {
            name,
            class,
            dob,
            address,
            phone,
            email,
        } => {
            let registration = RegistrationRecord::new(name, class, dob)
                .with_address(address.unwrap_or_default())
                .with_phone_number(phone.unwrap_or_default())
                .with_email(email.unwrap_or_default());
            library.registrations().register(&registration)?;
            println!("registered {}", registration.full_name);
        }
        Command::Registrations { json } => {
            let registrations = library.registrations().load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&registrations)?);
            } else {
                for registration in &registrations {
                    println!(
                        "{}\t{}\t{}\t{}\t{}\t{}",
                        registration.full_name,
                        registration.class,
                        format_date(registration.date_of_birth),
                        registration.address.as_deref().unwrap_or(""),
                        registration.phone_number.as_deref().unwrap_or(""),
                        registration.email.as_deref().unwrap_or(""),
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_loan(loan: &LoanRecord) {
    println!(
        "{}\t{}\t{}\t{}\t{}",
        loan.book_id,
        loan.title,
        loan.issued_to,
        format_date(loan.issue_date),
        loan.return_date.map(format_date).unwrap_or_default(),
    );
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
