// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod args;
pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{CloudArgs, CorpusArgs, ImageArgs, SourceArgs};

/// Scrape listing pages and render word clouds
#[derive(Parser, Debug)]
#[command(name = "wordcloud-cli")]
#[command(version)]
#[command(about = "Scrape toscrape.com listings and render word clouds", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the extracted items as JSON
    Items {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Write the primary text of every item to a corpus file
    Scrape {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        corpus: CorpusArgs,
    },

    /// Render a corpus file into an image
    Render {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        image: ImageArgs,
        #[command(flatten)]
        cloud: CloudArgs,
    },

    /// Scrape, write the corpus and render it
    Run {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        image: ImageArgs,
        #[command(flatten)]
        cloud: CloudArgs,
    },
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Items { source } => commands::items(&source).await,
        Commands::Scrape { source, corpus } => commands::scrape(&source, &corpus).await,
        Commands::Render {
            corpus,
            image,
            cloud,
        } => commands::render(&corpus, &image, &cloud).await,
        Commands::Run {
            source,
            corpus,
            image,
            cloud,
        } => commands::run(&source, &corpus, &image, &cloud).await,
    }
}
