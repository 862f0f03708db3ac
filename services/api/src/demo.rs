use crate::infra::{
    parse_bid_sort, parse_direction, parse_locale, parse_search_sort, parse_status, Dataset,
    InMemoryBidSource, InMemoryCatalog,
};
use clap::Args;
use procure_core::bids::{
    BidBoard, BidBoardQuery, BidComparisonService, BidId, BidSortKey, BidStatusFilter,
    ComparisonView, RfqId, ScoringEngine, SortDirection,
};
use procure_core::config::AppConfig;
use procure_core::error::AppError;
use procure_core::format::{format_currency, format_date, Locale};
use procure_core::search::{
    export_csv, BudgetRange, SearchEngine, SearchFilters, SearchOutcome, SearchPage, SearchSort,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Request-for-quotation whose bids are ranked
    #[arg(long)]
    pub(crate) rfq: String,
    /// JSON dataset (defaults to PROCURE_DATASET, then the bundled demo)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// all, submitted, under_review, accepted, or rejected
    #[arg(long, default_value = "all", value_parser = parse_status)]
    pub(crate) status: BidStatusFilter,
    /// price, timeline, rating, submitted, or score
    #[arg(long, default_value = "price", value_parser = parse_bid_sort)]
    pub(crate) sort: BidSortKey,
    #[arg(long, default_value = "asc", value_parser = parse_direction)]
    pub(crate) direction: SortDirection,
    #[arg(long, default_value = "en-IN", value_parser = parse_locale)]
    pub(crate) locale: Locale,
    /// Print each bid's weighted score components
    #[arg(long)]
    pub(crate) breakdown: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    #[arg(long)]
    pub(crate) rfq: String,
    /// Bid to include; repeat for each bid
    #[arg(long = "bid", required = true)]
    pub(crate) bids: Vec<String>,
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    #[arg(long, default_value = "en-IN", value_parser = parse_locale)]
    pub(crate) locale: Locale,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Free-text query matched against titles, descriptions, and tags
    #[arg(long, default_value = "")]
    pub(crate) query: String,
    #[arg(long)]
    pub(crate) category: Option<String>,
    #[arg(long)]
    pub(crate) location: Option<String>,
    #[arg(long)]
    pub(crate) urgency: Option<String>,
    /// request, offer, or vendor
    #[arg(long = "type")]
    pub(crate) entity_type: Option<String>,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) min_price: f64,
    #[arg(long)]
    pub(crate) max_price: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) min_rating: f64,
    /// Only entries marked available
    #[arg(long)]
    pub(crate) available: bool,
    /// Tag filter; an entry matches when it carries any of the given tags
    #[arg(long = "tag")]
    pub(crate) tags: Vec<String>,
    /// relevance, newest, oldest, price_asc, price_desc, or rating
    #[arg(long, default_value = "relevance", value_parser = parse_search_sort)]
    pub(crate) sort: SearchSort,
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    #[arg(long)]
    pub(crate) page_size: Option<usize>,
    /// Write the page as CSV instead of a table
    #[arg(long)]
    pub(crate) csv: bool,
    #[arg(long, default_value = "en-IN", value_parser = parse_locale)]
    pub(crate) locale: Locale,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    #[arg(long, default_value = "en-IN", value_parser = parse_locale)]
    pub(crate) locale: Locale,
}

impl SearchArgs {
    fn filters(&self) -> SearchFilters {
        let mut filters = SearchFilters::with_query(self.query.clone());
        filters.category = self.category.clone();
        filters.location = self.location.clone();
        filters.urgency = self.urgency.clone();
        filters.entity_type = self.entity_type.clone();
        filters.budget_range = BudgetRange::new(self.min_price, self.max_price);
        filters.rating = self.min_rating;
        filters.availability = self.available;
        for tag in &self.tags {
            filters.add_tag(tag);
        }
        filters
    }
}

/// Dataset named on the command line, else the configured one, else the bundled demo.
fn load_dataset(explicit: Option<PathBuf>, config: &AppConfig) -> Result<Dataset, AppError> {
    let path = explicit.or_else(|| config.dataset.clone());
    Dataset::load(path.as_deref())
}

fn bid_service(dataset: &Dataset) -> BidComparisonService<InMemoryBidSource> {
    BidComparisonService::new(Arc::new(InMemoryBidSource::from_records(
        dataset.bids.clone(),
    )))
}

pub(crate) async fn run_bid_ranking(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let dataset = load_dataset(args.dataset, &config)?;
    let service = bid_service(&dataset);

    let query = BidBoardQuery {
        status: args.status,
        sort: args.sort,
        direction: args.direction,
    };
    let board = service.board(&RfqId(args.rfq), query).await?;
    render_board(&board, service.engine(), args.locale, args.breakdown);
    Ok(())
}

pub(crate) async fn run_bid_comparison(args: CompareArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let dataset = load_dataset(args.dataset, &config)?;
    let service = bid_service(&dataset);

    let selected = args.bids.into_iter().map(BidId).collect();
    let view = service.compare(&RfqId(args.rfq), selected).await?;
    render_comparison(&view, args.locale);
    Ok(())
}

pub(crate) async fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let filters = args.filters();
    filters.validate()?;

    let dataset = load_dataset(args.dataset.clone(), &config)?;
    let engine = SearchEngine::new(
        Arc::new(InMemoryCatalog::new(dataset.catalog)),
        config.search,
    );
    let pagination = engine.pagination(args.page, args.page_size)?;

    match engine.search(&filters, pagination, args.sort).await {
        SearchOutcome::Ready(page) => {
            if args.csv {
                print!("{}", export_csv(&page.results)?);
            } else {
                render_search_page(&filters, &page, args.locale);
            }
            Ok(())
        }
        SearchOutcome::Failed(error) => Err(error.into()),
        SearchOutcome::Superseded { request } => {
            println!("Search #{request} was superseded before it completed.");
            Ok(())
        }
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let dataset = load_dataset(args.dataset, &config)?;
    let locale = args.locale;

    println!("Procurement marketplace demo");

    let source = InMemoryBidSource::from_records(dataset.bids.clone());
    let rfq_ids = source.rfq_ids();
    let service = BidComparisonService::new(Arc::new(source));

    for rfq_id in &rfq_ids {
        let query = BidBoardQuery {
            sort: BidSortKey::Score,
            direction: SortDirection::Desc,
            ..BidBoardQuery::default()
        };
        let board = service.board(rfq_id, query).await?;
        println!();
        render_board(&board, service.engine(), locale, false);

        let shortlist: Vec<BidId> = board
            .bids
            .iter()
            .take(2)
            .map(|scored| scored.bid.id.clone())
            .collect();
        if shortlist.len() == 2 {
            let view = service.compare(rfq_id, shortlist).await?;
            println!();
            render_comparison(&view, locale);
        }
    }

    let engine = SearchEngine::new(
        Arc::new(InMemoryCatalog::new(dataset.catalog)),
        config.search,
    );
    let mut filters = SearchFilters::with_query("steel");
    filters.availability = true;
    let pagination = engine.pagination(1, None)?;

    println!();
    match engine.search(&filters, pagination, SearchSort::Relevance).await {
        SearchOutcome::Ready(page) => {
            render_search_page(&filters, &page, locale);
            println!("\nCSV export of the visible page:");
            print!("{}", export_csv(&page.results)?);
        }
        SearchOutcome::Failed(error) => return Err(error.into()),
        SearchOutcome::Superseded { .. } => {}
    }

    engine.clear_results();
    println!("\nSearch state after clearing: {}", engine.state().label());
    Ok(())
}

fn render_board(board: &BidBoard, engine: &ScoringEngine, locale: Locale, breakdown: bool) {
    println!(
        "Bid board for {} ({} bid(s))",
        board.rfq_id.0, board.analytics.count
    );

    if board.bids.is_empty() {
        println!("  No bids match the selected filters.");
        return;
    }

    let currency = board.bids[0].bid.currency.as_str();
    println!(
        "  {:<12} {:<28} {:>16} {:>6} {:>6}  {}",
        "bid", "vendor", "price", "days", "score", "status"
    );
    for scored in &board.bids {
        let bid = &scored.bid;
        println!(
            "  {:<12} {:<28} {:>16} {:>6} {:>6}  {}",
            bid.id.0,
            bid.vendor_name,
            format_currency(bid.total_price, &bid.currency, locale),
            bid.delivery_timeline_days,
            scored.score,
            bid.status.label(),
        );

        if breakdown {
            for component in engine.breakdown(bid) {
                println!(
                    "      {:<10} raw {:>6.1} x {:.2} = {:>5.1}  {}",
                    component.factor.label(),
                    component.raw,
                    component.weight,
                    component.weighted,
                    component.notes,
                );
            }
        }
    }

    let analytics = &board.analytics;
    println!(
        "  Average price {} | average delivery {} day(s)",
        format_currency(analytics.average_price as f64, currency, locale),
        analytics.average_timeline_days
    );
    if let (Some(low), Some(high)) = (analytics.lowest_price, analytics.highest_price) {
        println!(
            "  Price range {} to {}",
            format_currency(low, currency, locale),
            format_currency(high, currency, locale)
        );
    }

    println!("  Price distribution:");
    for entry in &analytics.distribution {
        let bar = "#".repeat((entry.percent_of_max / 5.0).round() as usize);
        println!(
            "    {:<12} {:<20} {:>5.1}%",
            entry.bid_id.0, bar, entry.percent_of_max
        );
    }

    let statuses: Vec<String> = analytics
        .status_breakdown
        .iter()
        .map(|entry| format!("{} {}", entry.status_label, entry.count))
        .collect();
    println!("  Status: {}", statuses.join(", "));
}

fn render_comparison(view: &ComparisonView, locale: Locale) {
    println!("Comparison for {}", view.rfq_id.0);
    if view.rows.is_empty() {
        println!("  None of the selected bids are still available.");
        return;
    }

    for row in &view.rows {
        let rating = row
            .rating
            .map(|rating| format!("{rating:.1}/5"))
            .unwrap_or_else(|| "n/a".to_string());
        let completion = row
            .completion_rate
            .map(|rate| format!("{rate:.0}%"))
            .unwrap_or_else(|| "n/a".to_string());
        let warranty = row
            .warranty_months
            .map(|months| format!("{months} month(s)"))
            .unwrap_or_else(|| "none".to_string());

        println!(
            "  {} ({}): {} in {} day(s), score {}, rating {}, completion {}, warranty {}",
            row.bid_id.0,
            row.vendor_name,
            format_currency(row.price, &row.currency, locale),
            row.timeline_days,
            row.score,
            rating,
            completion,
            warranty,
        );
    }

    let summary = &view.summary;
    let label = |id: &Option<BidId>| {
        id.as_ref()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| "-".to_string())
    };
    println!(
        "  Lowest price: {} | fastest delivery: {} | best score: {}",
        label(&summary.lowest_price),
        label(&summary.fastest_delivery),
        label(&summary.best_score)
    );
}

fn render_search_page(filters: &SearchFilters, page: &SearchPage, locale: Locale) {
    let query = if filters.query.trim().is_empty() {
        "(any)".to_string()
    } else {
        format!("\"{}\"", filters.query.trim())
    };
    println!(
        "Search {} with {} active filter(s): {} result(s), page {} of {}",
        query,
        filters.active_filter_count(),
        page.total_count,
        page.page,
        page.total_pages.max(1)
    );

    for result in &page.results {
        let price = result
            .price
            .map(|price| {
                format_currency(price, result.currency.as_deref().unwrap_or("INR"), locale)
            })
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  [{:<7}] {:<48} {:<10} {:>16} {:>4.0}%  {}",
            result.entity_type.label(),
            result.title,
            result.location.as_deref().unwrap_or("-"),
            price,
            result.relevance,
            format_date(result.created_at, locale),
        );
    }
}
