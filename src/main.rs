use catalog_search::{
    Client, DEFAULT_BASE_URL, Hit, QueryValues, RequestOption, Response, SearchFailure,
    SearchQuery, set_request_id, set_timeout,
};
use clap::Parser;
use std::process;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Search the media catalog from the command line
#[derive(Debug, Parser)]
#[command(name = "catalog-search", version, about)]
struct Args {
    /// Device the results are meant for, e.g. tve_web
    #[arg(long)]
    device_type: Option<String>,

    /// Result language: sv, nb, da or fi
    #[arg(long = "lang")]
    language: Option<String>,

    /// Site to search, e.g. cmore.se
    #[arg(long)]
    site: Option<String>,

    #[arg(long)]
    brand_id: Option<String>,

    #[arg(long)]
    episode: Option<String>,

    #[arg(long)]
    page_size: Option<String>,

    #[arg(long)]
    season: Option<String>,

    #[arg(long)]
    season_id: Option<String>,

    /// Restrict results to one kind of hit, e.g. episode or series
    #[arg(long = "type")]
    kind: Option<String>,

    /// Video id to fetch, may be repeated
    #[arg(long = "video-id")]
    video_ids: Vec<String>,

    #[arg(long)]
    sort_by: Option<String>,

    /// Sort order: asc or desc
    #[arg(long)]
    order: Option<String>,

    /// Additional query parameter as KEY=VALUE, may be repeated
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Value for the X-Request-Id header
    #[arg(long)]
    request_id: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Base URL of the search service
    #[arg(long, env = "CATALOG_SEARCH_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Print the hits as JSON
    #[arg(long)]
    json: bool,

    /// Log requests and decoding steps
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn query(&self) -> QueryValues {
        let query = SearchQuery {
            device_type: self.device_type.clone().unwrap_or_default(),
            language: self.language.clone().unwrap_or_default(),
            site: self.site.clone().unwrap_or_default(),
            brand_id: self.brand_id.clone().unwrap_or_default(),
            episode: self.episode.clone().unwrap_or_default(),
            page_size: self.page_size.clone().unwrap_or_default(),
            season: self.season.clone().unwrap_or_default(),
            season_id: self.season_id.clone().unwrap_or_default(),
            kind: self.kind.clone().unwrap_or_default(),
            video_ids: self.video_ids.clone(),
            sort_by: self.sort_by.clone().unwrap_or_default(),
            order: self.order.clone().unwrap_or_default(),
        };

        let mut values = QueryValues::from(&query);
        for (key, value) in &self.params {
            values.append(key.as_str(), value.as_str());
        }
        values
    }

    fn options(&self) -> Vec<RequestOption> {
        let mut options = Vec::new();
        if let Some(request_id) = &self.request_id {
            options.push(set_request_id(request_id.as_str()));
        }
        if let Some(seconds) = self.timeout {
            options.push(set_timeout(Duration::from_secs(seconds)));
        }
        options
    }
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("catalog_search=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Formats a hit as a single line of output
fn describe(hit: &Hit, language: &str) -> String {
    match hit {
        Hit::Asset(asset) => {
            let title = asset
                .brand
                .titles
                .preferred(language)
                .or_else(|| asset.fields.titles.preferred(language))
                .unwrap_or(asset.video_id.as_str());

            if asset.season.number > 0 || asset.episode_number > 0 {
                format!(
                    "{} S{:02}E{:02}",
                    title, asset.season.number, asset.episode_number
                )
            } else {
                format!("{} [{}]", title, asset.kind)
            }
        }
        Hit::Series(series) => {
            let title = series
                .fields
                .titles
                .preferred(language)
                .unwrap_or(series.brand_id.as_str());
            format!("{} (series, {} seasons)", title, series.seasons.len())
        }
    }
}

fn print_response(response: &Response, language: &str, json: bool) {
    if json {
        match serde_json::to_string_pretty(&response.hits) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("Error: Failed to encode hits: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if response.hits.is_empty() {
        println!("No hits found.");
    }
    for hit in &response.hits {
        println!("{}", describe(hit, language));
    }
    println!(
        "\n{} of {} hit(s) shown",
        response.hits.len(),
        response.total_hits
    );
}

fn report_failure(failure: &SearchFailure) {
    eprintln!("Error: {}", failure);
    if let Some(response) = failure.response() {
        if let Some(status) = response.meta.status {
            eprintln!("  Status: {}", status);
        }
        eprintln!("  Request: {}", response.meta.request_url);
        if response.total_hits > 0 {
            eprintln!("  Total hits: {}", response.total_hits);
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut builder = Client::builder().base_url(args.base_url.as_str());
    if let Some(seconds) = args.timeout {
        builder = builder.timeout(Duration::from_secs(seconds));
    }
    if args.verbose {
        builder = builder.logger(|line| eprintln!("{}", line));
    }

    let client = match builder.build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let query = args.query();
    debug!(query = %query.encode(), "running search");

    let language = args.language.clone().unwrap_or_default();
    match client.search(query, args.options()) {
        Ok(response) => print_response(&response, &language, args.json),
        Err(failure) => {
            report_failure(&failure);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_search::hit::{Asset, Brand, Season, Series, Titles};

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("fields=title_sv").unwrap(),
            ("fields".to_string(), "title_sv".to_string())
        );
        assert_eq!(
            parse_param("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=x").is_err());
    }

    #[test]
    fn test_args_query() {
        let args = Args::parse_from([
            "catalog-search",
            "--site",
            "cmore.se",
            "--lang",
            "sv",
            "--video-id",
            "a",
            "--video-id",
            "b",
            "--param",
            "fields=title_sv",
            "--base-url",
            "http://localhost/",
        ]);

        let query = args.query();
        assert_eq!(query.get("site"), Some("cmore.se"));
        assert_eq!(query.get("lang"), Some("sv"));
        assert_eq!(query.get("video_ids"), Some("a,b"));
        assert_eq!(query.get("fields"), Some("title_sv"));
        assert!(args.options().is_empty());
    }

    #[test]
    fn test_describe_hits() {
        let mut episode = Asset::default();
        episode.kind = "episode".to_string();
        episode.video_id = "1".to_string();
        episode.brand = Brand {
            titles: Titles {
                sv: "Solsidan".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        episode.season = Season {
            number: 2,
            ..Default::default()
        };
        episode.episode_number = 5;
        assert_eq!(
            describe(&Hit::from(episode), "sv"),
            "Solsidan S02E05"
        );

        let mut movie = Asset::default();
        movie.kind = "movie".to_string();
        movie.video_id = "42".to_string();
        assert_eq!(describe(&Hit::from(movie), "sv"), "42 [movie]");

        let mut series = Series::default();
        series.kind = "series".to_string();
        series.brand_id = "7".to_string();
        series.seasons = vec![1, 2, 3];
        assert_eq!(
            describe(&Hit::from(series), "fi"),
            "7 (series, 3 seasons)"
        );
    }
}
