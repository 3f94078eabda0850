//! Text rendering
//!
//! Turns backend responses into plain-text tables for the terminal.

use std::fmt::Write as _;
use std::io;

use serde_json::Value;

use crate::client::{
    AnalyticsSummary, AnalyticsView, AssociationRule, Game, Metadata, PredictionResponse,
};
use crate::explorer::{PageInfo, QueryState, SortColumn, SortOrder};
use crate::guidance::{self, GuidanceSection, Insight, Trend};

// ============ Field formatting ============

/// Sales in millions of units, e.g. `82.53M`
pub fn format_sales(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}M", v))
        .unwrap_or_else(|| "-".to_string())
}

/// Whole scores print without decimals, fractional ones with one
pub fn format_score(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{:.0}", v),
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}

pub fn format_year(value: Option<f64>) -> String {
    value
        .map(|y| format!("{:.0}", y))
        .unwrap_or_else(|| "-".to_string())
}

/// `16719` → `16,719`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Cut `text` to `width` characters, marking the cut with `...`
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{}...", kept)
}

fn text_or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

// ============ Games table ============

fn header_label(label: &str, column: SortColumn, state: Option<&QueryState>) -> String {
    match state {
        Some(s) if s.sort_column == column => {
            let arrow = match s.sort_order {
                SortOrder::Asc => "^",
                SortOrder::Desc => "v",
            };
            format!("{} {}", label, arrow)
        }
        _ => label.to_string(),
    }
}

/// Games as a fixed-width table; the active sort column gets an arrow
pub fn render_games_table(games: &[Game], state: Option<&QueryState>) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<32} {:<8} {:<6} {:<14} {:<22} {:>10} {:>8} {:>6}",
        header_label("Name", SortColumn::Name, state),
        "Platform",
        "Year",
        "Genre",
        "Publisher",
        header_label("Global", SortColumn::GlobalSales, state),
        header_label("Critic", SortColumn::CriticScore, state),
        header_label("User", SortColumn::UserScore, state),
    );
    let _ = writeln!(out, "{}", "-".repeat(113));

    for game in games {
        let _ = writeln!(
            out,
            "{:<32} {:<8} {:<6} {:<14} {:<22} {:>10} {:>8} {:>6}",
            truncate(text_or_dash(&game.name), 32),
            truncate(text_or_dash(&game.platform), 8),
            format_year(game.year),
            truncate(text_or_dash(&game.genre), 14),
            truncate(text_or_dash(&game.publisher), 22),
            format_sales(game.global_sales),
            format_score(game.critic_score),
            format_score(game.user_score),
        );
    }

    out
}

/// Page numbers with the current one bracketed, e.g. `< 5 6 [7] 8 9 >`
pub fn render_page_window(info: &PageInfo) -> String {
    let mut parts = Vec::with_capacity(info.window.len() + 2);
    parts.push(if info.has_previous { "<" } else { " " }.to_string());
    for page in &info.window {
        if *page == info.current {
            parts.push(format!("[{}]", page));
        } else {
            parts.push(page.to_string());
        }
    }
    parts.push(if info.has_next { ">" } else { " " }.to_string());
    parts.join(" ").trim_end().to_string()
}

fn describe_filters(state: &QueryState) -> String {
    let mut filters = Vec::new();
    if !state.search.is_empty() {
        filters.push(format!("search=\"{}\"", state.search));
    }
    if !state.platform.is_empty() {
        filters.push(format!("platform={}", state.platform));
    }
    if !state.genre.is_empty() {
        filters.push(format!("genre={}", state.genre));
    }
    if !state.publisher.is_empty() {
        filters.push(format!("publisher={}", state.publisher));
    }
    match (state.year_min, state.year_max) {
        (Some(min), Some(max)) => filters.push(format!("years={}-{}", min, max)),
        (Some(min), None) => filters.push(format!("years>={}", min)),
        (None, Some(max)) => filters.push(format!("years<={}", max)),
        (None, None) => {}
    }
    if filters.is_empty() {
        "none".to_string()
    } else {
        filters.join(", ")
    }
}

/// The whole explorer view: filters, counts, table, and page controls
pub fn render_explorer(
    state: &QueryState,
    games: &[Game],
    info: &PageInfo,
    loading: bool,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Filters: {}", describe_filters(state));
    let _ = writeln!(
        out,
        "Sort: {} {}",
        state.sort_column.as_str(),
        state.sort_order.as_str()
    );
    let _ = writeln!(
        out,
        "Showing {} of {} games{:>20}Page {} of {}",
        games.len(),
        format_thousands(info.total_items),
        "",
        info.current,
        info.total_pages
    );
    out.push('\n');

    if games.is_empty() && !loading {
        let _ = writeln!(out, "No games found matching your criteria");
    } else {
        out.push_str(&render_games_table(games, Some(state)));
    }

    if loading {
        let _ = writeln!(out, "Loading...");
    }

    out.push('\n');
    let _ = writeln!(out, "{}", render_page_window(info));
    out
}

/// Games as CSV with the dataset's column names
pub fn write_games_csv<W: io::Write>(games: &[Game], writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "Name",
        "Platform",
        "Year_of_Release",
        "Genre",
        "Publisher",
        "NA_Sales",
        "EU_Sales",
        "JP_Sales",
        "Other_Sales",
        "Global_Sales",
        "Critic_Score",
        "User_Score",
    ])?;

    let num = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    for game in games {
        wtr.write_record([
            game.name.clone().unwrap_or_default(),
            game.platform.clone().unwrap_or_default(),
            game.year.map(|y| format!("{:.0}", y)).unwrap_or_default(),
            game.genre.clone().unwrap_or_default(),
            game.publisher.clone().unwrap_or_default(),
            num(game.na_sales),
            num(game.eu_sales),
            num(game.jp_sales),
            num(game.other_sales),
            num(game.global_sales),
            num(game.critic_score),
            num(game.user_score),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

// ============ Dashboard & metadata ============

pub fn render_summary(summary: &AnalyticsSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dataset Summary");
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "  Total games:      {}", format_thousands(summary.total_games));
    let _ = writeln!(out, "  Total sales:      {:.2}M", summary.total_sales);
    let _ = writeln!(out, "  Avg critic score: {:.1}", summary.avg_critic_score);
    let _ = writeln!(out, "  Avg user score:   {:.1}", summary.avg_user_score);
    let _ = writeln!(
        out,
        "  Years:            {}-{}",
        summary.year_range.min, summary.year_range.max
    );
    let _ = writeln!(
        out,
        "  Platforms / genres / publishers: {} / {} / {}",
        summary.unique_platforms, summary.unique_genres, summary.unique_publishers
    );
    let _ = writeln!(out, "  Top genre:        {}", summary.top_genre);
    let _ = writeln!(out, "  Top platform:     {}", summary.top_platform);
    let _ = writeln!(out, "  Top publisher:    {}", summary.top_publisher);
    out
}

pub fn render_metadata(metadata: &Metadata) -> String {
    let mut out = String::new();

    if let Some(accuracy) = metadata.model_accuracy {
        let _ = writeln!(out, "Model accuracy: {}", format_percent(accuracy));
        out.push('\n');
    }

    let _ = writeln!(out, "Platforms ({}): {}", metadata.platforms.len(), metadata.platforms.join(", "));
    let _ = writeln!(out, "Genres ({}): {}", metadata.genres.len(), metadata.genres.join(", "));
    let _ = writeln!(out, "Publishers: {}", metadata.publishers.len());

    let features = metadata.ranked_features();
    if !features.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Key success factors:");
        for feature in features {
            let _ = writeln!(
                out,
                "  {:<20} {:>6}",
                feature.display_name(),
                format_percent(feature.importance)
            );
        }
    }

    if !metadata.cluster_labels.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Clusters:");
        for (id, label) in &metadata.cluster_labels {
            let _ = writeln!(out, "  {}: {}", id, label);
        }
    }

    out
}

// ============ Prediction ============

pub fn render_prediction(result: &PredictionResponse) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Predicted category: {}",
        result.prediction.as_deref().unwrap_or("unknown")
    );
    if let Some(confidence) = result.confidence {
        let _ = writeln!(out, "Confidence:         {}", format_percent(confidence));
    }

    let probs = result.ranked_probabilities();
    if !probs.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Probabilities:");
        for (class, p) in probs {
            let bar = "#".repeat((p * 30.0).round() as usize);
            let _ = writeln!(out, "  {:<12} {:>6}  {}", class, format_percent(p), bar);
        }
    }

    if !result.recommendations.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Recommendations:");
        for rec in &result.recommendations {
            let _ = writeln!(out, "  [{}] {}: {}", rec.kind.label(), rec.title, rec.message);
        }
    }

    out
}

// ============ Guidance ============

fn render_insights(out: &mut String, insights: &[Insight]) {
    for insight in insights {
        let _ = writeln!(out, "{}", insight.title);
        for point in insight.points {
            let _ = writeln!(out, "  - {}", point);
        }
        out.push('\n');
    }
}

/// One guidance section; the investor view uses model facts from metadata
/// and the rules view shows the mined rules
pub fn render_guidance(
    section: GuidanceSection,
    metadata: Option<&Metadata>,
    rules: &[AssociationRule],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", section.title());
    let _ = writeln!(out, "{}", "=".repeat(section.title().len()));
    out.push('\n');

    match section {
        GuidanceSection::Strategic => render_insights(&mut out, &guidance::STRATEGIC),
        GuidanceSection::Publisher => {
            for item in &guidance::PUBLISHER_ACTIONS {
                let _ = writeln!(out, "[{:<6}] {}", item.priority.label(), item.title);
                let _ = writeln!(out, "         {}", item.detail);
                out.push('\n');
            }
        }
        GuidanceSection::Developer => render_insights(&mut out, &guidance::DEVELOPER),
        GuidanceSection::Investor => {
            let _ = writeln!(out, "Key indicators");
            for (label, value, trend) in &guidance::INVESTOR_INDICATORS {
                let _ = writeln!(out, "  {:<32} {:<30} {}", label, value, trend.arrow());
            }
            let accuracy = metadata
                .and_then(|m| m.model_accuracy)
                .map(format_percent)
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "  {:<32} {:<30} {}",
                "Model Accuracy",
                accuracy,
                Trend::Up.arrow()
            );
            out.push('\n');

            render_insights(&mut out, &[guidance::LOW_RISK, guidance::HIGH_RISK]);

            if let Some(labels) = metadata.map(|m| &m.cluster_labels).filter(|l| !l.is_empty()) {
                let _ = writeln!(out, "ROI potential by sales cluster");
                for (cluster, label) in labels {
                    let _ = writeln!(out, "  {:<24} {}", label, guidance::roi_outlook(cluster));
                }
            }
        }
        GuidanceSection::Rules => {
            let _ = writeln!(
                out,
                "Patterns in successful games found by the Apriori algorithm."
            );
            out.push('\n');
            out.push_str(&render_rules(rules));
        }
    }

    out
}

// ============ Analytics ============

pub fn render_rules(rules: &[AssociationRule]) -> String {
    if rules.is_empty() {
        return "No association rules available\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<40} {:<28} {:>8} {:>10} {:>6}",
        "If", "Then", "Support", "Confidence", "Lift"
    );
    let _ = writeln!(out, "{}", "-".repeat(96));
    for rule in rules {
        let _ = writeln!(
            out,
            "{:<40} {:<28} {:>8.3} {:>10} {:>6.2}",
            truncate(&rule.antecedent, 40),
            truncate(&rule.consequent, 28),
            rule.support,
            format_percent(rule.confidence),
            rule.lift
        );
    }
    out
}

fn number(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 => format!("{:.0}", f),
            Some(f) => format!("{:.2}", f),
            None => n.to_string(),
        },
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Per-genre, per-platform, or per-year aggregates
fn render_breakdown(rows: &[Value], key: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<18} {:>12} {:>10} {:>8} {:>10} {:>8}",
        key, "Total sales", "Avg sales", "Games", "Avg critic", "Avg user"
    );
    let _ = writeln!(out, "{}", "-".repeat(71));
    for row in rows {
        let _ = writeln!(
            out,
            "{:<18} {:>12} {:>10} {:>8} {:>10} {:>8}",
            truncate(&number(row, key), 18),
            number(row, "total_sales"),
            number(row, "avg_sales"),
            number(row, "game_count"),
            number(row, "avg_critic"),
            number(row, "avg_user"),
        );
    }
    out
}

/// Column-major correlation matrix as a grid
fn render_correlation(matrix: &serde_json::Map<String, Value>) -> String {
    let columns: Vec<&String> = matrix.keys().collect();
    let mut out = String::new();

    let _ = write!(out, "{:<14}", "");
    for col in &columns {
        let _ = write!(out, " {:>12}", truncate(col, 12));
    }
    out.push('\n');

    for row in &columns {
        let _ = write!(out, "{:<14}", truncate(row, 14));
        for col in &columns {
            let cell = matrix
                .get(*col)
                .and_then(|c| c.get(row.as_str()))
                .and_then(Value::as_f64)
                .map(|v| format!("{:.3}", v))
                .unwrap_or_else(|| "-".to_string());
            let _ = write!(out, " {:>12}", cell);
        }
        out.push('\n');
    }
    out
}

fn render_clusters(data: &Value) -> String {
    let stats = match data.get("cluster_stats").and_then(Value::as_array) {
        Some(stats) => stats,
        None => return pretty_json(data),
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<22} {:>7} {:>10} {:>12} {:>10} {:>8}",
        "#", "Label", "Games", "Avg sales", "Total sales", "Avg critic", "Avg user"
    );
    let _ = writeln!(out, "{}", "-".repeat(79));
    for cluster in stats {
        let _ = writeln!(
            out,
            "{:<4} {:<22} {:>7} {:>10} {:>12} {:>10} {:>8}",
            number(cluster, "cluster"),
            truncate(&number(cluster, "label"), 22),
            number(cluster, "count"),
            number(cluster, "avg_sales"),
            number(cluster, "total_sales"),
            number(cluster, "avg_critic"),
            number(cluster, "avg_user"),
        );
    }
    out
}

// ============ Chart data ============

/// Platforms shown in the dashboard platform table
pub const TOP_PLATFORMS: usize = 8;

const BAR_WIDTH: f64 = 30.0;

const REGIONS: [(&str, &str); 4] = [
    ("NA_Sales", "North America"),
    ("EU_Sales", "Europe"),
    ("JP_Sales", "Japan"),
    ("Other_Sales", "Other"),
];

/// `{name: sales}` entries, largest first
fn ranked_sales(map: &serde_json::Map<String, Value>) -> Vec<(&str, f64)> {
    let mut rows: Vec<(&str, f64)> = map
        .iter()
        .filter_map(|(name, value)| value.as_f64().map(|v| (name.as_str(), v)))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));
    rows
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    "#".repeat(((value / max) * BAR_WIDTH).round().max(1.0) as usize)
}

fn render_sales_rows(out: &mut String, rows: &[(String, f64)]) {
    let max = rows.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    for (name, value) in rows {
        let _ = writeln!(
            out,
            "  {:<20} {:>10} {}",
            truncate(name, 20),
            format_sales(Some(*value)),
            bar(*value, max)
        );
    }
}

/// `/api/chart-data`: genres ranked by sales, top platforms, the regional
/// split with shares, and yearly sales in release order
pub fn render_chart_data(data: &Value) -> String {
    let Some(charts) = data.as_object() else {
        return pretty_json(data);
    };
    let mut out = String::new();

    if let Some(genres) = charts.get("genre_sales").and_then(Value::as_object) {
        let rows: Vec<(String, f64)> = ranked_sales(genres)
            .into_iter()
            .map(|(name, v)| (name.to_string(), v))
            .collect();
        let _ = writeln!(out, "Sales by genre");
        render_sales_rows(&mut out, &rows);
        out.push('\n');
    }

    if let Some(platforms) = charts.get("platform_sales").and_then(Value::as_object) {
        let rows: Vec<(String, f64)> = ranked_sales(platforms)
            .into_iter()
            .take(TOP_PLATFORMS)
            .map(|(name, v)| (name.to_string(), v))
            .collect();
        let _ = writeln!(out, "Top {} platforms", TOP_PLATFORMS);
        render_sales_rows(&mut out, &rows);
        out.push('\n');
    }

    if let Some(regions) = charts.get("regional_sales").and_then(Value::as_object) {
        let values: Vec<(&str, f64)> = REGIONS
            .iter()
            .map(|(key, label)| (*label, regions.get(*key).and_then(Value::as_f64).unwrap_or(0.0)))
            .collect();
        let total: f64 = values.iter().map(|(_, v)| v).sum();

        let _ = writeln!(out, "Regional sales");
        for (label, value) in values {
            let share = if total > 0.0 { value / total } else { 0.0 };
            let _ = writeln!(
                out,
                "  {:<20} {:>10} {:>7}",
                label,
                format_sales(Some(value)),
                format_percent(share)
            );
        }
        out.push('\n');
    }

    if let Some(years) = charts.get("yearly_sales").and_then(Value::as_object) {
        // Keys may arrive as "2006" or "2006.0"
        let mut rows: Vec<(f64, f64)> = years
            .iter()
            .filter_map(|(year, value)| Some((year.parse::<f64>().ok()?, value.as_f64()?)))
            .collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        let rows: Vec<(String, f64)> = rows
            .into_iter()
            .map(|(year, v)| (format!("{:.0}", year), v))
            .collect();
        let _ = writeln!(out, "Sales by year");
        render_sales_rows(&mut out, &rows);
    }

    if out.is_empty() {
        return pretty_json(data);
    }
    out
}

fn pretty_json(value: &Value) -> String {
    let mut text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    text.push('\n');
    text
}

/// Best-effort text view of an analytics response; unknown shapes print as JSON
pub fn render_analytics(view: AnalyticsView, data: &Value) -> String {
    match (view, data) {
        (AnalyticsView::Genre, Value::Array(rows)) => render_breakdown(rows, "Genre"),
        (AnalyticsView::Platform, Value::Array(rows)) => render_breakdown(rows, "Platform"),
        (AnalyticsView::Yearly, Value::Array(rows)) => render_breakdown(rows, "Year_of_Release"),
        (AnalyticsView::Correlation, Value::Object(matrix)) => render_correlation(matrix),
        (AnalyticsView::ChartData, _) => render_chart_data(data),
        (AnalyticsView::Clusters, _) => render_clusters(data),
        (AnalyticsView::Summary, _) => {
            match serde_json::from_value::<AnalyticsSummary>(data.clone()) {
                Ok(summary) => render_summary(&summary),
                Err(_) => pretty_json(data),
            }
        }
        (AnalyticsView::Rules, _) => {
            match serde_json::from_value::<Vec<AssociationRule>>(data.clone()) {
                Ok(rules) => render_rules(&rules),
                Err(_) => pretty_json(data),
            }
        }
        _ => pretty_json(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Recommendation, RecommendationKind};
    use serde_json::json;

    fn game(name: &str, sales: f64) -> Game {
        Game {
            name: Some(name.to_string()),
            platform: Some("Wii".to_string()),
            year: Some(2006.0),
            genre: Some("Sports".to_string()),
            publisher: Some("Nintendo".to_string()),
            global_sales: Some(sales),
            critic_score: Some(76.0),
            user_score: Some(8.5),
            ..Default::default()
        }
    }

    #[test]
    fn test_field_formatting() {
        assert_eq!(format_sales(Some(82.534)), "82.53M");
        assert_eq!(format_sales(None), "-");
        assert_eq!(format_score(Some(76.0)), "76");
        assert_eq!(format_score(Some(8.5)), "8.5");
        assert_eq!(format_year(Some(2006.0)), "2006");
        assert_eq!(format_percent(0.873), "87.3%");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(16719), "16,719");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Halo", 10), "Halo");
        assert_eq!(truncate("The Legend of Zelda", 10), "The Leg...");
        assert_eq!(truncate("Pokémon Red", 5), "Po...");
    }

    #[test]
    fn test_games_table_marks_sort_column() {
        let state = QueryState::default();
        let table = render_games_table(&[game("Wii Sports", 82.53)], Some(&state));
        let header = table.lines().next().unwrap();
        assert!(header.contains("Global v"));
        assert!(table.contains("Wii Sports"));
        assert!(table.contains("82.53M"));
    }

    #[test]
    fn test_explorer_view_with_no_results() {
        let state = QueryState::default();
        let info = PageInfo::new(1, 0, 15);
        let view = render_explorer(&state, &[], &info, false);
        assert!(view.contains("Showing 0 of 0 games"));
        assert!(view.contains("Page 1 of 0"));
        assert!(view.contains("No games found matching your criteria"));
    }

    #[test]
    fn test_explorer_view_page_window() {
        let state = QueryState {
            page: 7,
            genre: "Action".to_string(),
            ..Default::default()
        };
        let info = PageInfo::new(7, 180, 15);
        let view = render_explorer(&state, &[game("GTA V", 21.04)], &info, true);
        assert!(view.contains("genre=Action"));
        assert!(view.contains("Page 7 of 12"));
        assert!(view.contains("< 5 6 [7] 8 9 >"));
        assert!(view.contains("Loading..."));
    }

    #[test]
    fn test_explorer_header_uses_clamped_page() {
        let state = QueryState {
            page: 99,
            ..Default::default()
        };
        let info = PageInfo::new(99, 40, 15);
        let view = render_explorer(&state, &[], &info, false);
        assert!(view.contains("Page 3 of 3"));
        assert!(!view.contains("Page 99"));
        assert!(view.contains("< 1 2 [3]"));
    }

    #[test]
    fn test_games_csv() {
        let mut buf = Vec::new();
        write_games_csv(&[game("Mario Kart, Wii", 35.52)], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Name,Platform,Year_of_Release"));
        assert!(lines.next().unwrap().starts_with("\"Mario Kart, Wii\",Wii,2006"));
    }

    #[test]
    fn test_prediction_rendering() {
        let result = PredictionResponse {
            success: true,
            prediction: Some("Hit".to_string()),
            confidence: Some(0.62),
            probabilities: [("Hit".to_string(), 0.62), ("Low".to_string(), 0.38)]
                .into_iter()
                .collect(),
            recommendations: vec![Recommendation {
                kind: RecommendationKind::Warning,
                title: "Investment".to_string(),
                message: "Moderate to high investment recommended.".to_string(),
            }],
            ..Default::default()
        };

        let text = render_prediction(&result);
        assert!(text.contains("Predicted category: Hit"));
        assert!(text.contains("62.0%"));
        assert!(text.contains("[WARN] Investment"));
    }

    #[test]
    fn test_breakdown_rendering() {
        let data = json!([
            {"Genre": "Action", "total_sales": 1120.5, "avg_sales": 0.53, "game_count": 2100, "avg_critic": 67.2, "avg_user": 7.0}
        ]);
        let text = render_analytics(AnalyticsView::Genre, &data);
        assert!(text.contains("Action"));
        assert!(text.contains("1120.50"));
        assert!(text.contains("2100"));
    }

    #[test]
    fn test_correlation_rendering() {
        let data = json!({
            "Critic_Score": {"Critic_Score": 1.0, "User_Score": 0.58},
            "User_Score": {"Critic_Score": 0.58, "User_Score": 1.0}
        });
        let text = render_analytics(AnalyticsView::Correlation, &data);
        assert!(text.contains("0.580"));
        assert!(text.contains("1.000"));
    }

    #[test]
    fn test_unknown_shape_falls_back_to_json() {
        let data = json!({"buckets": [1, 2]});
        let text = render_analytics(AnalyticsView::Clusters, &data);
        assert!(text.contains("\"buckets\""));
        assert!(render_chart_data(&json!({"other": 1})).contains("\"other\""));
    }

    fn line_of(text: &str, needle: &str) -> usize {
        text.lines()
            .position(|line| line.contains(needle))
            .unwrap_or_else(|| panic!("{} missing from\n{}", needle, text))
    }

    #[test]
    fn test_chart_data_ranked_by_sales() {
        let data = json!({
            "genre_sales": {"Action": 1.0, "Puzzle": 10.0, "Sports": 5.0},
            "platform_sales": {
                "A1": 1.0, "A2": 2.0, "A3": 3.0, "A4": 4.0, "A5": 5.0,
                "A6": 6.0, "A7": 7.0, "A8": 8.0, "A9": 9.0, "B0": 0.5
            }
        });
        let text = render_analytics(AnalyticsView::ChartData, &data);

        assert!(line_of(&text, "Puzzle") < line_of(&text, "Sports"));
        assert!(line_of(&text, "Sports") < line_of(&text, "Action"));

        assert!(text.contains("Top 8 platforms"));
        assert!(line_of(&text, "A9") < line_of(&text, "A2"));
        assert!(!text.contains("A1 "));
        assert!(!text.contains("B0"));
    }

    #[test]
    fn test_chart_data_regions_and_years() {
        let data = json!({
            "regional_sales": {"NA_Sales": 50.0, "EU_Sales": 30.0, "JP_Sales": 15.0, "Other_Sales": 5.0},
            "yearly_sales": {"2010.0": 3.0, "1996.0": 1.0, "2003.0": 2.0}
        });
        let text = render_chart_data(&data);

        assert!(text.contains("North America"));
        assert!(text.contains("50.0%"));
        assert!(text.contains("5.0%"));
        assert!(line_of(&text, "1996") < line_of(&text, "2003"));
        assert!(line_of(&text, "2003") < line_of(&text, "2010"));
        assert!(!text.contains("2010.0"));
    }

    #[test]
    fn test_guidance_sections() {
        let strategic = render_guidance(GuidanceSection::Strategic, None, &[]);
        assert!(strategic.starts_with("Strategic Insights"));
        assert!(strategic.contains("Risk Factors"));

        let publisher = render_guidance(GuidanceSection::Publisher, None, &[]);
        assert!(publisher.contains("[High  ] Focus on Critic Scores"));

        let metadata = Metadata {
            model_accuracy: Some(0.823),
            cluster_labels: [("0".to_string(), "Blockbuster".to_string())]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        let investor = render_guidance(GuidanceSection::Investor, Some(&metadata), &[]);
        assert!(investor.contains("82.3%"));
        assert!(investor.contains("Blockbuster"));
        assert!(investor.contains("Highest ROI potential"));

        let rules = render_guidance(GuidanceSection::Rules, None, &[]);
        assert!(rules.contains("No association rules available"));
    }

    #[test]
    fn test_rules_rendering() {
        assert!(render_rules(&[]).contains("No association rules"));

        let rules = vec![AssociationRule {
            antecedent: "Genre_Shooter, Platform_PS4".to_string(),
            consequent: "Success_Hit".to_string(),
            support: 0.021,
            confidence: 0.71,
            lift: 2.4,
        }];
        let text = render_rules(&rules);
        assert!(text.contains("Success_Hit"));
        assert!(text.contains("71.0%"));
    }
}
