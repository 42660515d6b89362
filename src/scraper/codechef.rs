use ::scraper::Selector;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::{CodeChefStats, Source};
use crate::scraper::{self, select_all_text};

// These selectors track the current profile markup. When CodeChef changes its
// page the affected fields come back empty instead of failing the lookup.
const RATING_SELECTOR: &str = ".rating-number";
const PROBLEMS_SOLVED_SELECTOR: &str = ".problems-solved h5";
const STARS_SELECTOR: &str = ".rating";

#[instrument(skip(client))]
pub(crate) async fn get_profile(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
) -> Result<CodeChefStats> {
    let url = scraper::profile_url(base_url, &["users", username])?;
    let document = scraper::get_document(client, Source::CodeChef, &url).await?;
    let stats = parse_profile(&document, username)?;

    debug!(
        rating = %stats.rating,
        problems_solved = %stats.problems_solved,
        "parsed codechef profile"
    );

    Ok(stats)
}

pub(crate) fn parse_profile(document: &scraper::Html, username: &str) -> Result<CodeChefStats> {
    let root = document.root_element();

    let rating_selector = Selector::parse(RATING_SELECTOR)?;
    let rating = select_all_text(&root, &rating_selector);

    let problems_selector = Selector::parse(PROBLEMS_SOLVED_SELECTOR)?;
    let problems_solved = select_all_text(&root, &problems_selector);

    let stars_selector = Selector::parse(STARS_SELECTOR)?;
    let stars = select_all_text(&root, &stars_selector);

    Ok(CodeChefStats {
        rating,
        problems_solved,
        stars,
        username: username.to_string(),
    })
}
