//! Investment Projection CLI
//!
//! Command-line interface for running projections against the product catalog

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use investment_projection::{
    calculator::EffectiveRateMethod,
    config::DEFAULT_CATALOG_PATH,
    request::load_requests,
    CalculationResponse, InvestmentRequest, InvestmentResult, InvestmentService, ServiceError,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "investment_projection",
    version,
    about = "Project returns on investment products"
)]
struct Cli {
    /// Product catalog JSON file
    #[arg(long, global = true, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List products and their terms
    Products,

    /// Project a single lump-sum deposit
    Single {
        #[arg(long)]
        product: String,
        #[arg(long)]
        term_days: i64,
        #[arg(long)]
        amount: String,
    },

    /// Project a recurring monthly contribution
    Recurring {
        #[arg(long)]
        product: String,
        #[arg(long)]
        term_days: i64,
        /// Monthly contribution
        #[arg(long)]
        amount: String,
        /// Months of contributions (defaults to term_days / 30)
        #[arg(long)]
        months: Option<i64>,
        /// Write the growth schedule to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Rank products by return on a single deposit
    Compare {
        #[arg(long)]
        amount: f64,
        /// Price each product on its term nearest to this many days
        #[arg(long)]
        term_days: Option<u32>,
    },

    /// Run every request in a CSV file (ProductId,TermDays,Amount,InvestmentKind,RunMonths)
    Batch { path: PathBuf },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let service = InvestmentService::from_path(&cli.catalog)
        .with_context(|| format!("loading catalog from {}", cli.catalog.display()))?;

    match cli.command {
        Command::Products => print_products(&service),
        Command::Single { product, term_days, amount } => {
            let request = InvestmentRequest::single(product, term_days, amount);
            let response = run(&service, &request)?;
            print_response(&response);
        }
        Command::Recurring { product, term_days, amount, months, csv } => {
            let mut request = InvestmentRequest::recurring(product, term_days, amount, 0);
            request.run_months = months;
            let response = run(&service, &request)?;
            print_response(&response);
            if let Some(path) = csv {
                write_schedule_csv(&path, &response)?;
                println!("\nGrowth schedule written to: {}", path.display());
            }
        }
        Command::Compare { amount, term_days } => {
            if !amount.is_finite() || amount < 0.0 {
                bail!("amount must be a non-negative number");
            }
            print_comparison(&service, amount, term_days);
        }
        Command::Batch { path } => {
            let requests = load_requests(&path)
                .with_context(|| format!("loading requests from {}", path.display()))?;
            run_batch(&service, &requests);
        }
    }

    Ok(())
}

fn run(service: &InvestmentService, request: &InvestmentRequest) -> Result<CalculationResponse> {
    match service.calculate(request) {
        Ok(response) => Ok(response),
        Err(ServiceError::Validation(errors)) => {
            for error in &errors {
                eprintln!("  - {}", error);
            }
            bail!("request rejected with {} validation error(s)", errors.len())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_products(service: &InvestmentService) {
    if service.catalog().is_empty() {
        println!("No products available");
        return;
    }

    for product in service.catalog().products() {
        println!("{} ({})", product.name, product.id);
        if let Some(description) = &product.description {
            println!("  {}", description);
        }
        for term in &product.terms {
            println!("  {:>5} days  {:>7.2}%  {}", term.days, term.annual_rate_pct, term.name);
        }
    }
}

fn print_response(response: &CalculationResponse) {
    let product = &response.product;
    println!("{} - {} ({:.2}% annual)", product.name, product.term_name, product.annual_rate_pct);
    println!("{}", "-".repeat(60));

    match &response.result {
        InvestmentResult::Single(r) => {
            println!("  Principal:        ${:>15.2}", r.principal);
            println!("  Term:             {:>8} days ({:.1} months)", r.term_days, r.term_months);
            println!("  Total Return:     ${:>15.2}", r.total_return);
            println!("  Final Amount:     ${:>15.2}", r.final_amount);
            println!("  Effective Rate:   {:>15.2}%", r.effective_annual_rate_pct);
        }
        InvestmentResult::Recurring(r) => {
            let method = match r.effective_rate_method {
                EffectiveRateMethod::InternalRateOfReturn => "IRR",
                EffectiveRateMethod::GrowthFactor => "growth factor",
                EffectiveRateMethod::SimpleExtrapolation => "simple extrapolation",
            };
            println!("  Monthly:          ${:>15.2}", r.monthly_contribution);
            println!("  Months:           {:>16}", r.num_months);
            println!("  Total Contributed:${:>15.2}", r.total_contributed);
            println!("  Total Return:     ${:>15.2}", r.total_return);
            println!("  Final Amount:     ${:>15.2}", r.final_amount);
            println!("  Effective Rate:   {:>15.2}% ({})", r.effective_annual_rate_pct, method);
        }
    }

    if response.growth_schedule.is_empty() {
        return;
    }

    println!();
    println!(
        "{:>6} {:>12} {:>14} {:>12} {:>14} {:>14}",
        "Month", "Contrib", "Contributed", "Interest", "Cum Interest", "Balance"
    );
    for row in &response.growth_schedule {
        println!(
            "{:>6} {:>12.2} {:>14.2} {:>12.2} {:>14.2} {:>14.2}",
            row.period,
            row.contribution_this_period,
            row.cumulative_contributed,
            row.interest_this_period,
            row.cumulative_interest,
            row.balance
        );
    }
}

fn print_comparison(service: &InvestmentService, amount: f64, term_days: Option<u32>) {
    let rows = service.compare(amount, term_days);
    if rows.is_empty() {
        println!("No products available");
        return;
    }

    println!(
        "{:>3} {:<28} {:>6} {:>8} {:>14} {:>16}",
        "#", "Product", "Days", "Rate", "Return", "Final"
    );
    println!("{}", "-".repeat(80));
    for (i, row) in rows.iter().enumerate() {
        println!(
            "{:>3} {:<28} {:>6} {:>7.2}% {:>14.2} {:>16.2}",
            i + 1,
            row.product_name,
            row.term_days,
            row.annual_rate_pct,
            row.total_return,
            row.final_amount
        );
    }
}

fn run_batch(service: &InvestmentService, requests: &[InvestmentRequest]) {
    let results = service.calculate_batch(requests);
    let mut failures = 0;

    for (request, result) in requests.iter().zip(&results) {
        match result {
            Ok(response) => println!(
                "{:<12} {:>6} {:<9} final {:>16.2}  return {:>14.2}",
                request.product_id,
                request.term_days,
                request.investment_kind,
                response.result.final_amount(),
                response.result.total_return()
            ),
            Err(e) => {
                failures += 1;
                println!(
                    "{:<12} {:>6} {:<9} error: {}",
                    request.product_id, request.term_days, request.investment_kind, e
                );
            }
        }
    }

    println!("\n{} requests, {} failed", requests.len(), failures);
}

fn write_schedule_csv(path: &Path, response: &CalculationResponse) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in &response.growth_schedule {
        writer.serialize(row.rounded())?;
    }
    writer.flush()?;
    Ok(())
}
