use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::{output_writer, page_all, stdout_is_terminal};
use gitlet::errors::GitletError;
use std::ffi::OsString;
use std::path::Path;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A small version-control system",
    long_about = "Gitlet tracks the plain files of one directory: it stages and \
    commits snapshots, keeps branches, merges them and exchanges history with \
    other repositories on the same filesystem.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

COMMANDS:
{subcommands}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create a repository in the current directory")]
    Init,
    #[command(about = "Stage a file for the next commit")]
    Add { file: String },
    #[command(about = "Record the staged files as a new commit")]
    Commit { message: Option<String> },
    #[command(about = "Unstage a file, or stage its removal")]
    Rm { file: String },
    #[command(about = "Show the current branch's history")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(about = "Print the ids of commits with the given message")]
    Find { message: String },
    #[command(about = "Show branches, staged files and working directory changes")]
    Status,
    #[command(
        about = "Switch branches or restore files",
        long_about = "checkout <branch> switches branches; checkout -- <file> restores \
        a file from the current commit; checkout <commit> -- <file> restores it from \
        the given commit."
    )]
    Checkout {
        target: Option<String>,
        #[arg(last = true)]
        files: Vec<String>,
    },
    #[command(about = "Create a branch at the current commit")]
    Branch { name: String },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch { name: String },
    #[command(about = "Check out a commit and move the current branch to it")]
    Reset { commit_id: String },
    #[command(about = "Merge a branch into the current branch")]
    Merge { branch: String },
    #[command(name = "add-remote", about = "Register a remote repository")]
    AddRemote { name: String, path: String },
    #[command(name = "rm-remote", about = "Forget a remote repository")]
    RmRemote { name: String },
    #[command(about = "Append the current history to a remote branch")]
    Push { remote: String, branch: String },
    #[command(about = "Copy a remote branch into <remote>/<branch>")]
    Fetch { remote: String, branch: String },
    #[command(about = "Fetch a remote branch and merge it")]
    Pull { remote: String, branch: String },
}

fn main() -> Result<()> {
    if std::env::args_os().len() <= 1 {
        println!("Please enter a command.");
        return Ok(());
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return report_usage_error(error),
    };

    if !stdout_is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli.command) {
        Ok(()) => Ok(()),
        Err(error) => match GitletError::find_in(&error) {
            Some(gitlet_error) => {
                println!("{gitlet_error}");
                Ok(())
            }
            None => Err(error),
        },
    }
}

fn report_usage_error(error: clap::Error) -> Result<()> {
    match error.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => error.exit(),
        _ if !names_a_command(std::env::args_os().nth(1)) => {
            println!("No command with that name exists.")
        }
        _ => println!("{}", GitletError::IncorrectOperands),
    }

    Ok(())
}

fn names_a_command(verb: Option<OsString>) -> bool {
    verb.is_some_and(|verb| {
        Cli::command()
            .get_subcommands()
            .any(|command| verb == command.get_name())
    })
}

fn run(command: Commands) -> Result<()> {
    let pwd = std::env::current_dir()?;

    match command {
        Commands::Init => {
            let mut repository = Repository::init(&pwd, Box::new(std::io::stdout()))?;
            repository.persist()
        }
        Commands::Add { file } => with_repository(&pwd, false, |repo| repo.add(&file)),
        Commands::Commit { message } => with_repository(&pwd, false, |repo| {
            repo.commit(message.as_deref().unwrap_or_default())
        }),
        Commands::Rm { file } => with_repository(&pwd, false, |repo| repo.rm(&file)),
        Commands::Log => with_repository(&pwd, true, |repo| repo.log()),
        Commands::GlobalLog => with_repository(&pwd, true, |repo| repo.global_log()),
        Commands::Find { message } => with_repository(&pwd, false, |repo| repo.find(&message)),
        Commands::Status => with_repository(&pwd, false, |repo| repo.status()),
        Commands::Checkout { target, files } => with_repository(&pwd, false, |repo| {
            match (target.as_deref(), files.as_slice()) {
                (Some(branch), []) => repo.checkout_branch(branch),
                (None, [file]) => repo.checkout_file(file),
                (Some(commit_id), [file]) => repo.checkout_file_at(commit_id, file),
                _ => Err(GitletError::IncorrectOperands.into()),
            }
        }),
        Commands::Branch { name } => with_repository(&pwd, false, |repo| repo.branch(&name)),
        Commands::RmBranch { name } => with_repository(&pwd, false, |repo| repo.rm_branch(&name)),
        Commands::Reset { commit_id } => {
            with_repository(&pwd, false, |repo| repo.reset(&commit_id))
        }
        Commands::Merge { branch } => with_repository(&pwd, false, |repo| repo.merge(&branch)),
        Commands::AddRemote { name, path } => {
            with_repository(&pwd, false, |repo| repo.add_remote(&name, &path))
        }
        Commands::RmRemote { name } => with_repository(&pwd, false, |repo| repo.rm_remote(&name)),
        Commands::Push { remote, branch } => {
            with_repository(&pwd, false, |repo| repo.push(&remote, &branch))
        }
        Commands::Fetch { remote, branch } => {
            with_repository(&pwd, false, |repo| repo.fetch(&remote, &branch))
        }
        Commands::Pull { remote, branch } => {
            with_repository(&pwd, false, |repo| repo.pull(&remote, &branch))
        }
    }
}

/// Open the repository, run one command against it and persist the result
///
/// Nothing is persisted when the command fails.
fn with_repository(
    path: &Path,
    paged: bool,
    command: impl FnOnce(&mut Repository) -> Result<()>,
) -> Result<()> {
    let (writer, pager) = output_writer(paged);
    let mut repository = Repository::open(path, writer)?;

    command(&mut repository)?;
    repository.persist()?;
    drop(repository);

    if let Some(pager) = pager {
        page_all(pager)?;
    }

    Ok(())
}
