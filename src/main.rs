//! Terminal front end for the candidate-management panel. Plays the roles
//! the web app delegates to its table, spinner, and confirmation-modal
//! components.

use std::io::{self, BufRead, Write};

use clap::Parser;
use log::{error, info};

use election_admin_panel::api::{HttpApi, ImageFile};
use election_admin_panel::model::Id;
use election_admin_panel::panel::{FormStatus, ManageCandidates, RegistrationForm};
use election_admin_panel::{Config, Error, Result};

/// Manage election candidates: list, register, delete.
#[derive(Parser)]
struct Args {
    /// Base URL of the election API; overrides ADMIN_PANEL_API_URL.
    #[arg(long)]
    api_url: Option<String>,

    /// Authenticated admin identity; overrides ADMIN_PANEL_ADMIN_ID.
    #[arg(long)]
    admin_id: Option<String>,
}

async fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(url) = args.api_url {
        config.set_api_url(url);
    }
    if let Some(id) = args.admin_id {
        config.set_admin_id(Id::from(id));
    }

    // The panel is inert until the session provider has resolved an
    // identity; without one there is nothing we may fetch.
    let admin_id = config.admin_id().cloned().ok_or_else(|| {
        Error::Config(
            "no admin identity resolved; set ADMIN_PANEL_ADMIN_ID or pass --admin-id".to_string(),
        )
    })?;

    let api = HttpApi::new(&config)?;
    info!("panel starting for admin {admin_id} against {}", config.api_url());

    println!("Loading candidates...");
    let mut page = ManageCandidates::load(&api, &admin_id).await?;

    render_table(&page);
    print_help();

    loop {
        // A closed stdin means nobody is left to answer prompts.
        let Some(line) = ask("> ")? else { break };
        let mut words = line.split_whitespace();
        match words.next() {
            None => {}
            Some("list") => render_table(&page),
            Some("register") => register(&api, &mut page).await?,
            Some("delete") => delete(&api, &mut page, words.next()).await?,
            Some("quit") | Some("exit") => break,
            _ => print_help(),
        }
    }

    Ok(())
}

/// Prompt-and-submit loop for one registration.
async fn register(api: &HttpApi, page: &mut ManageCandidates) -> Result<()> {
    let mut form = RegistrationForm::new();
    let Some(name) = ask("Full name: ")? else { return Ok(()) };
    form.name = name;
    let Some(email) = ask("Email address: ")? else { return Ok(()) };
    form.email = email;
    let Some(password) = ask("Password: ")? else { return Ok(()) };
    form.password = password;

    let Some(path) = ask("Profile picture path: ")? else { return Ok(()) };
    if !path.is_empty() {
        // An unreadable path only cancels this attempt, never the session.
        match ImageFile::from_path(&path) {
            Ok(image) => form.set_picture(Some(image)),
            Err(err) => {
                println!("Could not read {path}: {err}");
                return Ok(());
            }
        }
    }

    if page.elections().is_empty() {
        println!("You have no elections to assign candidates to.");
        return Ok(());
    }
    println!("Elections:");
    for (index, election) in page.elections().iter().enumerate() {
        println!("  {}. {}", index + 1, election.title);
    }
    if let Some(election) = choose(page.elections().len(), "Election number: ")? {
        form.select_election(Some(page.elections()[election].id.clone()));
    }

    let posts: Vec<String> = form
        .available_posts(page.elections())
        .iter()
        .map(|post| post.title.clone())
        .collect();
    if posts.is_empty() {
        println!("This election has no posts.");
    } else {
        println!("Posts:");
        for (index, title) in posts.iter().enumerate() {
            println!("  {}. {title}", index + 1);
        }
        if let Some(post) = choose(posts.len(), "Post number: ")? {
            form.select_post(Some(posts[post].clone()));
        }
    }

    println!("Processing...");
    match form.submit(api).await {
        Ok(candidate) => {
            if let FormStatus::Succeeded(message) = form.status() {
                println!("{message}");
            }
            page.candidate_added(candidate);
            render_table(page);
        }
        // Entered values stay in the form, but this simple front end
        // rebuilds it per attempt; the message is what matters.
        Err(err) => println!("{err}"),
    }
    Ok(())
}

/// Two-step delete: record intent, then only fire on explicit confirmation.
async fn delete(api: &HttpApi, page: &mut ManageCandidates, index: Option<&str>) -> Result<()> {
    let candidate = index
        .and_then(|raw| raw.parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
        .and_then(|n| page.candidates().get(n))
        .map(|c| (c.id.clone(), c.name.clone()));
    let Some((id, name)) = candidate else {
        println!("Usage: delete <row number>");
        return Ok(());
    };

    page.request_delete(id);
    println!(
        "Are you sure you want to permanently delete {name}? \
         This action cannot be undone."
    );
    let answer = ask("Confirm [y/N]: ")?.unwrap_or_default();
    if answer.eq_ignore_ascii_case("y") {
        match page.confirm_delete(api).await {
            Ok(()) => {
                println!("Candidate deleted.");
                render_table(page);
            }
            Err(err) => println!("{err}"),
        }
    } else {
        page.cancel_delete();
        println!("Cancelled.");
    }
    Ok(())
}

fn render_table(page: &ManageCandidates) {
    if page.candidates().is_empty() {
        println!("No candidates registered yet.");
        return;
    }
    println!(
        "    {:<24} {:<28} {:<24} {:<16}",
        "NAME", "EMAIL", "ELECTION", "POST"
    );
    for (index, candidate) in page.candidates().iter().enumerate() {
        let election = candidate
            .election
            .as_ref()
            .and_then(|reference| reference.resolve(page.elections()))
            .map(|election| election.title.as_str())
            .unwrap_or("-");
        println!(
            "{:>3} {:<24} {:<28} {:<24} {:<16}",
            index + 1,
            candidate.name,
            candidate.email,
            election,
            candidate.election_post.as_deref().unwrap_or("-"),
        );
    }
}

fn print_help() {
    println!("Commands: list, register, delete <row number>, quit");
}

/// Blocking single-line prompt. `None` means stdin has closed.
fn ask(prompt: &str) -> Result<Option<String>> {
    ask_from(&mut io::stdin().lock(), prompt)
}

fn ask_from<R: BufRead>(input: &mut R, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Read a 1-based selection, returning the 0-based index if valid.
fn choose(len: usize, prompt: &str) -> Result<Option<usize>> {
    let Some(raw) = ask(prompt)? else {
        return Ok(None);
    };
    Ok(raw
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|&n| n < len))
}


#[tokio::main]
async fn main() {
    // Set up logging.
    log4rs::init_file("log4rs.yaml", Default::default())
        .expect("Failed to initialise logging");

    if let Err(err) = run().await {
        error!("{err}");
        eprintln!("{err}");
        std::process::exit(1)
    }
}
