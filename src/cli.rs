use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::reading::MeterId;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Project the meter's consumption cost under every configured price plan.
    Compare(CompareArgs),

    /// Rank the price plans from cheapest to priciest for the meter.
    Recommend(RecommendArgs),

    /// List the configured price plans.
    Plans(PlansArgs),
}

#[derive(Parser)]
pub struct DataArgs {
    /// Path to the price plan book.
    #[clap(long = "plans", env = "METERWISE_PLANS", default_value = "plans.toml")]
    pub plans_path: PathBuf,

    /// Path to the meter reading store.
    #[clap(long = "readings", env = "METERWISE_READINGS", default_value = "readings.json")]
    pub readings_path: PathBuf,
}

#[derive(Parser)]
pub struct CompareArgs {
    #[clap(flatten)]
    pub data: DataArgs,

    /// Smart meter identifier.
    pub meter_id: MeterId,
}

#[derive(Parser)]
pub struct RecommendArgs {
    #[clap(flatten)]
    pub data: DataArgs,

    /// Smart meter identifier.
    pub meter_id: MeterId,

    /// Keep at most this many of the cheapest plans.
    #[clap(long)]
    pub limit: Option<usize>,
}

#[derive(Parser)]
pub struct PlansArgs {
    #[clap(flatten)]
    pub data: DataArgs,
}
