use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fh_catalog::ContentKind;
use fh_types::VoteKind;

#[derive(Parser)]
#[command(
    name = "fandomhub",
    about = "FandomHub: browse, rate and discuss games, movies and series",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Profile document holding the viewer id, votes and threads
    #[arg(long, global = true, default_value = ".fandomhub/profile.json")]
    pub profile: PathBuf,

    /// Catalog document to use instead of the bundled one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the read-only catalog HTTP server
    Serve(ServeArgs),
    /// List or show catalog content
    Content(ContentArgs),
    /// Show trending content
    Trending,
    /// Show featured content
    Featured,
    /// Search titles, descriptions and types
    Search(SearchArgs),
    /// List the category items of a content
    Categories(ContentRef),
    /// Show a single category item
    Category(CategoryArgs),
    /// Like or dislike a content; repeating the same vote removes it
    Vote(VoteArgs),
    /// Remove your vote on a content
    Unvote(ContentRef),
    /// Show the rating of a content
    Rating(ContentRef),
    /// Show every rated content
    Ratings,
    /// Show the viewer id and display name of the profile
    Whoami,
    /// Get or set the chat display name
    Name(NameArgs),
    /// Show the comment thread of a content
    Thread(ContentRef),
    /// Post a message to a content's thread
    Post(PostArgs),
    /// Reply to a message
    Reply(ReplyArgs),
    /// Like or unlike a message or reply
    Like(LikeArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML server config
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ContentArgs {
    #[command(subcommand)]
    pub action: ContentAction,
}

#[derive(Subcommand)]
pub enum ContentAction {
    /// List content, optionally of one type
    List {
        #[arg(long = "type")]
        kind: Option<ContentKind>,
    },
    /// Show one content
    Show { id: String },
}

#[derive(Args)]
pub struct ContentRef {
    pub content: String,
}

#[derive(Args)]
pub struct SearchArgs {
    pub query: String,
}

#[derive(Args)]
pub struct CategoryArgs {
    pub id: String,
}

#[derive(Args)]
pub struct VoteArgs {
    pub content: String,
    /// like|dislike (also up/down, +/-)
    pub kind: VoteKind,
}

#[derive(Args)]
pub struct NameArgs {
    pub name: Option<String>,
}

#[derive(Args)]
pub struct PostArgs {
    pub content: String,
    pub message: String,
}

#[derive(Args)]
pub struct ReplyArgs {
    pub content: String,
    pub parent: String,
    pub message: String,
}

#[derive(Args)]
pub struct LikeArgs {
    pub content: String,
    pub message: String,
    /// Parent message id when liking a reply
    #[arg(long)]
    pub parent: Option<String>,
}
