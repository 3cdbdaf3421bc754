use std::path::PathBuf;

use anyhow::{bail, Context};
use colored::Colorize;
use fh_catalog::{
    display_value, CategoryEntry, ContentCatalog, ContentKind, ContentSummary, InMemoryCatalog,
};
use fh_sdk::{
    AggregateRating, Comment, ContentId, Message, MessageId, Profile, RatingSummary, VoteKind,
};
use fh_server::{FandomServer, ServerConfig};
use serde::Serialize;
use serde_json::json;

use crate::cli::*;

/// Global options every command sees.
struct Session {
    format: OutputFormat,
    profile: PathBuf,
    catalog: Option<PathBuf>,
}

impl Session {
    fn catalog(&self) -> anyhow::Result<InMemoryCatalog> {
        let catalog = match &self.catalog {
            Some(path) => InMemoryCatalog::load(path)?,
            None => InMemoryCatalog::seeded()?,
        };
        Ok(catalog)
    }

    fn profile(&self) -> anyhow::Result<Profile> {
        Profile::open(&self.profile)
            .with_context(|| format!("failed to open profile {}", self.profile.display()))
    }

    /// Print `value` as JSON, or run `text` in text mode.
    fn emit<T: Serialize + ?Sized>(&self, value: &T, text: impl FnOnce()) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Text => text(),
        }
        Ok(())
    }

    /// Warn when a content id is not in the catalog. Ratings and threads
    /// accept any id, so this never fails the command.
    fn check_content(&self, id: &ContentId) -> anyhow::Result<()> {
        if self.catalog()?.by_id(id).is_none() {
            tracing::warn!(content = %id, "content is not in the catalog");
        }
        Ok(())
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let session = Session {
        format: cli.format,
        profile: cli.profile,
        catalog: cli.catalog,
    };
    match cli.command {
        Command::Serve(args) => cmd_serve(&session, args),
        Command::Content(args) => match args.action {
            ContentAction::List { kind } => cmd_content_list(&session, kind),
            ContentAction::Show { id } => cmd_content_show(&session, &id),
        },
        Command::Trending => {
            let list = session.catalog()?.trending();
            session.emit(&list, || print_summaries(&list))
        }
        Command::Featured => {
            let list = session.catalog()?.featured();
            session.emit(&list, || print_summaries(&list))
        }
        Command::Search(args) => cmd_search(&session, args),
        Command::Categories(args) => cmd_categories(&session, args),
        Command::Category(args) => cmd_category(&session, args),
        Command::Vote(args) => cmd_vote(&session, args),
        Command::Unvote(args) => cmd_unvote(&session, args),
        Command::Rating(args) => cmd_rating(&session, args),
        Command::Ratings => cmd_ratings(&session),
        Command::Whoami => cmd_whoami(&session),
        Command::Name(args) => cmd_name(&session, args),
        Command::Thread(args) => cmd_thread(&session, args),
        Command::Post(args) => cmd_post(&session, args),
        Command::Reply(args) => cmd_reply(&session, args),
        Command::Like(args) => cmd_like(&session, args),
    }
}

// ---- Server ----

fn cmd_serve(session: &Session, args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(path) = &session.catalog {
        config.catalog_path = Some(path.clone());
    }

    println!("FandomHub server on {}", config.bind_addr.to_string().bold());
    let server = FandomServer::new(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

// ---- Catalog ----

fn cmd_content_list(session: &Session, kind: Option<ContentKind>) -> anyhow::Result<()> {
    let catalog = session.catalog()?;
    let list = match kind {
        Some(kind) => catalog.by_type(kind),
        None => catalog.all(),
    };
    session.emit(&list, || print_summaries(&list))
}

fn cmd_content_show(session: &Session, id: &str) -> anyhow::Result<()> {
    let id = ContentId::new(id);
    let Some(content) = session.catalog()?.by_id(&id) else {
        bail!("content not found: {id}");
    };
    let rating = session.profile()?.rating(&id)?;

    session.emit(&json!({ "content": content, "rating": rating }), || {
        println!("{} ({})", content.title.bold(), content.kind.to_string().cyan());
        if let Some(year) = &content.year {
            println!("  Year: {year}");
        }
        if let Some(rating) = &content.rating {
            println!("  Critics: {}", rating.yellow());
        }
        for (key, value) in &content.metadata {
            println!("  {}: {}", capitalize(key), display_value(value));
        }
        if content.trending > 0 {
            println!("  Trending: #{}", content.trending);
        }
        if let Some(description) = &content.description {
            println!("\n{description}\n");
        }
        print_rating(&rating);
    })
}

fn cmd_search(session: &Session, args: SearchArgs) -> anyhow::Result<()> {
    if args.query.is_empty() {
        bail!("search query is required");
    }
    let hits = session.catalog()?.search(&args.query);
    session.emit(&hits, || {
        if hits.is_empty() {
            println!("No content matches {}.", args.query.yellow());
        } else {
            print_summaries(&hits);
        }
    })
}

fn cmd_categories(session: &Session, args: ContentRef) -> anyhow::Result<()> {
    let entries = session.catalog()?.categories_of(&ContentId::new(args.content));
    session.emit(&entries, || {
        let mut bucket: Option<&str> = None;
        for entry in &entries {
            if bucket != Some(entry.bucket.as_str()) {
                println!("{}", capitalize(&entry.bucket).bold());
                bucket = Some(entry.bucket.as_str());
            }
            println!("  {:<28} {}", entry.id.dimmed(), entry.name);
        }
        if entries.is_empty() {
            println!("No categories.");
        }
    })
}

fn cmd_category(session: &Session, args: CategoryArgs) -> anyhow::Result<()> {
    let Some(entry) = session.catalog()?.category(&args.id) else {
        bail!("category not found: {}", args.id);
    };
    session.emit(&entry, || print_category(&entry))
}

// ---- Ratings ----

fn cmd_vote(session: &Session, args: VoteArgs) -> anyhow::Result<()> {
    let content = ContentId::new(args.content);
    session.check_content(&content)?;
    let toggle = session.profile()?.toggle_vote(&content, args.kind)?;

    session.emit(&toggle, || {
        match toggle.viewer_vote {
            Some(VoteKind::Like) => println!("{} Liked {}", "✓".green().bold(), content.to_string().bold()),
            Some(VoteKind::Dislike) => println!("{} Disliked {}", "✓".red().bold(), content.to_string().bold()),
            None => println!("Removed your vote on {}", content.to_string().bold()),
        }
        print_aggregate(&toggle.aggregate);
    })
}

fn cmd_unvote(session: &Session, args: ContentRef) -> anyhow::Result<()> {
    let content = ContentId::new(args.content);
    let aggregate = session.profile()?.retract_vote(&content)?;
    session.emit(&aggregate, || {
        println!("Removed your vote on {}", content.to_string().bold());
        print_aggregate(&aggregate);
    })
}

fn cmd_rating(session: &Session, args: ContentRef) -> anyhow::Result<()> {
    let summary = session.profile()?.rating(&ContentId::new(args.content))?;
    session.emit(&summary, || print_rating(&summary))
}

fn cmd_ratings(session: &Session) -> anyhow::Result<()> {
    let all = session.profile()?.all_ratings()?;
    session.emit(&all, || {
        if all.is_empty() {
            println!("No ratings yet.");
        }
        for aggregate in &all {
            println!(
                "{:<28} {}  ({} {}, {} {})",
                aggregate.content_id.to_string().bold(),
                aggregate.formatted().yellow(),
                aggregate.likes,
                "▲".green(),
                aggregate.dislikes,
                "▼".red(),
            );
        }
    })
}

// ---- Identity ----

fn cmd_whoami(session: &Session) -> anyhow::Result<()> {
    let profile = session.profile()?;
    let viewer = profile.viewer_id()?;
    let name = profile.display_name()?;
    session.emit(&json!({ "viewerId": viewer, "displayName": name }), || {
        println!("Viewer: {}", viewer.to_string().cyan());
        match &name {
            Some(name) => println!("Name:   {}", name.bold()),
            None => println!("Name:   {}", "(not set)".dimmed()),
        }
    })
}

fn cmd_name(session: &Session, args: NameArgs) -> anyhow::Result<()> {
    let profile = session.profile()?;
    let name = match args.name {
        Some(name) => match profile.set_display_name(&name)? {
            Some(name) => Some(name),
            None => bail!("display name must not be empty"),
        },
        None => profile.display_name()?,
    };
    session.emit(&json!({ "displayName": name }), || match &name {
        Some(name) => println!("{}", name.bold()),
        None => println!("{}", "(not set)".dimmed()),
    })
}

// ---- Threads ----

fn cmd_thread(session: &Session, args: ContentRef) -> anyhow::Result<()> {
    let thread = session.profile()?.thread(&ContentId::new(args.content))?;
    session.emit(&thread, || {
        if thread.is_empty() {
            println!("No messages yet. Be the first to comment!");
        }
        for message in &thread {
            print_message(message);
        }
    })
}

fn cmd_post(session: &Session, args: PostArgs) -> anyhow::Result<()> {
    let content = ContentId::new(args.content);
    session.check_content(&content)?;
    let Some(message) = session.profile()?.post_message(&content, &args.message)? else {
        bail!("message must not be empty");
    };
    session.emit(&message, || {
        println!("{} Message sent", "✓".green().bold());
        print_message(&message);
    })
}

fn cmd_reply(session: &Session, args: ReplyArgs) -> anyhow::Result<()> {
    let content = ContentId::new(args.content);
    let parent = MessageId::from_raw(args.parent);
    let Some(reply) = session.profile()?.post_reply(&content, &parent, &args.message)? else {
        bail!("reply must not be empty");
    };
    session.emit(&reply, || {
        println!("{} Reply sent", "✓".green().bold());
        print_comment(&reply, "    ");
    })
}

fn cmd_like(session: &Session, args: LikeArgs) -> anyhow::Result<()> {
    let content = ContentId::new(args.content);
    let id = MessageId::from_raw(args.message);
    let parent = args.parent.map(MessageId::from_raw);
    let comment = session
        .profile()?
        .toggle_like(&content, &id, parent.as_ref())?;
    session.emit(&comment, || print_comment(&comment, ""))
}

// ---- Text output ----

fn print_summaries(list: &[ContentSummary]) {
    for content in list {
        println!(
            "{:<28} {} ({}, {})",
            content.id.to_string().dimmed(),
            content.title.bold(),
            content.kind.to_string().cyan(),
            content.year.as_deref().unwrap_or("?"),
        );
    }
}

fn print_category(entry: &CategoryEntry) {
    println!("{} ({})", entry.name.bold(), entry.bucket.cyan());
    println!("  Content: {}", entry.content_id);
    for (key, value) in entry.data.display_pairs() {
        println!("  {}: {}", capitalize(&key), value);
    }
}

fn print_aggregate(aggregate: &AggregateRating) {
    println!(
        "  Rating: {}  ({} likes, {} dislikes)",
        aggregate.formatted().yellow().bold(),
        aggregate.likes,
        aggregate.dislikes,
    );
}

fn print_rating(summary: &RatingSummary) {
    print_aggregate(&summary.aggregate);
    match summary.viewer_vote {
        Some(kind) => println!("  Your vote: {kind}"),
        None => println!("  Your vote: {}", "none".dimmed()),
    }
}

fn print_message(message: &Message) {
    print_comment(message, "");
    for reply in &message.replies {
        print_comment(reply, "    ");
    }
}

fn print_comment(comment: &Comment, indent: &str) {
    let heart = if comment.liked { "♥".red() } else { "♡".normal() };
    println!(
        "{indent}{} · {}  {} {}",
        comment.user.bold(),
        comment.timestamp.format("%Y-%m-%d %H:%M"),
        heart,
        comment.likes,
    );
    println!("{indent}  {}", comment.message);
    println!("{indent}  {}", comment.id.to_string().dimmed());
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
