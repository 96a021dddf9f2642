#![doc = include_str!("../README.md")]

mod cli;
mod estimator;
mod plan;
mod prelude;
mod reading;
mod store;
mod tables;

use clap::{Parser, crate_version};
use itertools::Itertools;

use crate::{
    cli::{Args, Command, CompareArgs, PlansArgs, RecommendArgs},
    estimator::CostEstimator,
    plan::PlanBook,
    prelude::*,
    store::InMemoryReadingStore,
    tables::{build_costs_table, build_plans_table},
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Compare(args) => compare(&args)?,
        Command::Recommend(args) => recommend(&args)?,
        Command::Plans(args) => plans(&args)?,
    }

    info!("done!");
    Ok(())
}

fn compare(args: &CompareArgs) -> Result {
    let book = PlanBook::load(&args.data.plans_path)?;
    let store = InMemoryReadingStore::load(&args.data.readings_path)?;
    let estimator = CostEstimator::new(book.plans.clone(), store);
    match estimator.costs_per_plan(&args.meter_id)? {
        Some(costs) => {
            let entries = costs
                .iter()
                .filter_map(|(name, cost)| book.plan(name).map(|plan| (plan, *cost)))
                .collect_vec();
            println!("{}", build_costs_table(&entries));
        }
        None => warn!(meter_id = %args.meter_id, "the reading store does not know this meter"),
    }
    Ok(())
}

fn recommend(args: &RecommendArgs) -> Result {
    let book = PlanBook::load(&args.data.plans_path)?;
    let store = InMemoryReadingStore::load(&args.data.readings_path)?;
    let estimator = CostEstimator::new(book.plans.clone(), store);
    match estimator.recommend(&args.meter_id, args.limit)? {
        Some(ranking) => {
            let entries = ranking
                .iter()
                .filter_map(|(name, cost)| book.plan(name).map(|plan| (plan, *cost)))
                .collect_vec();
            println!("{}", build_costs_table(&entries));
        }
        None => warn!(meter_id = %args.meter_id, "the reading store does not know this meter"),
    }
    Ok(())
}

fn plans(args: &PlansArgs) -> Result {
    let book = PlanBook::load(&args.data.plans_path)?;
    println!("{}", build_plans_table(&book.plans));
    Ok(())
}
