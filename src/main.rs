use clap::{Parser, Subcommand};
use jot::areas::repository::Repository;
use jot::errors::{JotError, JotResult};

#[derive(Parser)]
#[command(
    name = "jot",
    version = "0.1.0",
    about = "A tiny local version-control system",
    long_about = "jot tracks snapshots of a working directory as immutable, \
    content-addressed commits organized into named branches, with staging, \
    checkout, reset and three-way merge.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Initialize a new repository in the current directory")]
    Init,
    #[command(about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
    },
    #[command(about = "Unstage a file and schedule it for removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(about = "Show the active branch's history")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to look for")]
        message: String,
    },
    #[command(about = "Show branches, staged changes and untracked files")]
    Status,
    #[command(
        about = "Switch branches or restore files",
        long_about = "Three forms: `checkout <branch>` switches branches; \
        `checkout -- <file>` restores a file from HEAD; \
        `checkout <commit-id> -- <file>` restores a file from a commit."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit id when restoring a file")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(about = "Create a new branch at the current HEAD")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(about = "Move HEAD to a commit and reconcile the working directory")]
    Reset {
        #[arg(index = 1, help = "The commit id, possibly abbreviated")]
        commit_id: String,
    },
    #[command(about = "Merge another branch into the active branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        match err {
            JotError::Internal(err) => {
                eprintln!("Error: {err:?}");
                std::process::exit(1);
            }
            // domain errors print their stable message and terminate cleanly
            err => println!("{err}"),
        }
    }
}

fn run(cli: Cli) -> JotResult<()> {
    let pwd = std::env::current_dir()
        .map_err(|err| anyhow::anyhow!("Unable to determine the current directory: {err}"))?;

    if let Commands::Init = cli.command {
        Repository::init(pwd)?;
        return Ok(());
    }

    let mut repository = Repository::load(pwd)?;
    dispatch(&mut repository, cli.command)?;
    repository.persist()
}

fn dispatch(repository: &mut Repository, command: Commands) -> JotResult<()> {
    match command {
        Commands::Init => Ok(()),
        Commands::Add { file } => repository.add(&file),
        Commands::Commit { message } => repository.commit(message.as_deref().unwrap_or_default()),
        Commands::Rm { file } => repository.rm(&file),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(&message),
        Commands::Status => repository.status(),
        Commands::Checkout { target, file } => match (target, file) {
            (Some(branch), None) => repository.checkout_branch(&branch),
            (None, Some(file)) => repository.restore_from_head(&file),
            (Some(commit_id), Some(file)) => repository.restore_from_commit(&commit_id, &file),
            (None, None) => Err(JotError::IncorrectOperands),
        },
        Commands::Branch { name } => repository.branch(&name),
        Commands::RmBranch { name } => repository.rm_branch(&name),
        Commands::Reset { commit_id } => repository.reset(&commit_id),
        Commands::Merge { branch } => repository.merge(&branch),
    }
}
