use clap::{ArgAction, Parser, Subcommand};
use eyre::{Result, WrapErr, bail};
use gradebook::checks::check_consistency;
use gradebook::display::{display_grade, display_histogram, display_statistics};
use gradebook::{Config, GradeError, Gradebook, Loader};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::Level;

const DEFAULT_CONFIG: &str = "gradebook.toml";

#[derive(Parser)]
#[command(version, author, about)]
struct Options {
    /// Use FILE instead of gradebook.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Read the data files from DIR
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Set verbosity level
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Display the overall grade of a student
    Grade {
        #[arg(value_name = "STUDENT", required = true)]
        name: Vec<String>,
    },
    /// Display the min, average and max scores of an assignment
    Stats {
        #[arg(value_name = "ASSIGNMENT", required = true)]
        name: Vec<String>,
    },
    /// Display the score distribution of an assignment
    Histogram {
        #[arg(value_name = "ASSIGNMENT", required = true)]
        name: Vec<String>,
    },
    /// Choose the query interactively (default)
    Menu,
}

enum Query {
    Grade(String),
    Stats(String),
    Histogram(String),
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let options = Options::parse();
    let level = match options.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
    let mut config = load_config(options.config.as_deref())?;
    if let Some(data_dir) = options.data_dir {
        config.data_dir = data_dir;
    }
    let gradebook = Loader::new(&config)
        .load()
        .wrap_err("cannot load gradebook")?;
    check_consistency(&gradebook);
    let query = match options.command.unwrap_or(Command::Menu) {
        Command::Grade { name } => Query::Grade(name.join(" ")),
        Command::Stats { name } => Query::Stats(name.join(" ")),
        Command::Histogram { name } => Query::Histogram(name.join(" ")),
        Command::Menu => menu()?,
    };
    match answer(&gradebook, &query) {
        Ok(text) => println!("{text}"),
        Err(e @ GradeError::NotFound { .. }) => println!("{e}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn load_config(file: Option<&Path>) -> Result<Config> {
    let file = match file {
        Some(file) => file,
        None if Path::new(DEFAULT_CONFIG).is_file() => Path::new(DEFAULT_CONFIG),
        None => return Ok(Config::default()),
    };
    Config::load(file).wrap_err_with(|| format!("cannot use configuration {}", file.display()))
}

fn answer(g: &Gradebook, query: &Query) -> Result<String, GradeError> {
    match query {
        Query::Grade(name) => g.student_grade(name).map(display_grade),
        Query::Stats(name) => g
            .assignment_statistics(name)
            .map(|stats| display_statistics(&stats)),
        Query::Histogram(name) => g
            .assignment_scores(name)
            .map(|scores| display_histogram(name, scores)),
    }
}

fn menu() -> Result<Query> {
    println!("1. Student grade");
    println!("2. Assignment statistics");
    println!("3. Assignment graph");
    let choice = prompt("Enter your selection: ")?;
    Ok(match choice.as_str() {
        "1" => Query::Grade(prompt("What is the student's name: ")?),
        "2" => Query::Stats(prompt("What is the assignment name: ")?),
        "3" => Query::Histogram(prompt("What is the assignment name: ")?),
        other => bail!("invalid selection {other:?}"),
    })
}

fn prompt(question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .wrap_err("cannot read answer")?;
    Ok(line.trim().to_owned())
}
