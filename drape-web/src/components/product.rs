//! Product result components - cards, grid, load-more control, notices
//!
//! Pure functions of their inputs; every product field is HTML-escaped.

use drape_core::{PLACEHOLDER_IMAGE_URL, Product, format_price};

use super::layout::{button, html_escape, spinner};

/// Element id of the results grid.
pub const RESULTS_ID: &str = "results";
/// Element id of the load-more slot.
pub const LOAD_MORE_ID: &str = "load-more";
/// Element id of the error slot.
pub const ERROR_ID: &str = "search-error";
/// Element id of the search form, whose request queue load-more joins.
pub const SEARCH_FORM_ID: &str = "search-form";

/// Renders one product card.
///
/// A broken image is swapped for the placeholder once; the card itself
/// is never blanked.
pub fn product_card(product: &Product) -> String {
    let name = html_escape(&product.name);

    format!(
        r#"<div class="bg-white rounded-lg shadow-md overflow-hidden hover:shadow-lg transition-shadow duration-300">
            <div class="aspect-square w-full relative bg-gray-100">
                <img src="{image}" alt="{name}" class="w-full h-full object-cover"
                     onerror="this.onerror=null;this.src='{placeholder}';" />
            </div>
            <div class="p-4">
                <h3 class="font-semibold text-lg mb-2 line-clamp-2 min-h-[3.5rem]">{name}</h3>
                <div class="flex items-center justify-between mb-2">
                    <span class="text-lg font-bold text-blue-600">{price}</span>
                    <span class="text-sm bg-blue-100 text-blue-800 px-2 py-1 rounded-full">{score}% match</span>
                </div>
                <div class="text-sm text-gray-600 mb-2">{brand}</div>
                <p class="text-sm text-gray-500 line-clamp-3">{description}</p>
            </div>
        </div>"#,
        image = html_escape(product.display_image_url()),
        placeholder = PLACEHOLDER_IMAGE_URL,
        price = html_escape(&format_price(product.price)),
        score = product.match_percentage(),
        brand = html_escape(&product.brand),
        description = html_escape(&product.description),
    )
}

/// Renders cards without a container, for appending to an existing grid.
pub fn product_cards(products: &[Product]) -> String {
    products.iter().map(product_card).collect()
}

/// Renders the responsive results grid.
pub fn product_grid(products: &[Product]) -> String {
    format!(
        r#"<div id="{RESULTS_ID}" class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">{}</div>"#,
        product_cards(products)
    )
}

/// Renders the load-more slot; empty when no further page is offered.
///
/// The button fetches `next_page` and replaces the slot with whatever the
/// server renders for that page. It shares the search form's request
/// queue: a click is dropped while a search is in flight, and a new
/// search aborts a pending load-more before its cards are appended.
pub fn load_more_control(query: &str, next_page: Option<u32>) -> String {
    let Some(page) = next_page else {
        return format!(r#"<div id="{LOAD_MORE_ID}"></div>"#);
    };

    let url = format!(
        "/htmx/search?query={}&amp;page={page}",
        urlencoding::encode(query)
    );
    let attributes = format!(
        r##"type="button" hx-get="{url}" hx-target="#{LOAD_MORE_ID}" hx-swap="outerHTML" hx-sync="#{SEARCH_FORM_ID}:drop" hx-disabled-elt="this""##
    );
    let label = format!(
        r#"{}<span class="htmx-indicator">Loading more...</span><span class="idle-label">Load More Results</span>"#,
        spinner("load-more-spinner")
    );

    format!(
        r#"<div id="{LOAD_MORE_ID}" class="flex justify-center mt-8">{}</div>"#,
        button(&label, "outline", Some(&attributes))
    )
}

/// Renders the error slot; empty when there is no message.
pub fn error_alert(message: Option<&str>) -> String {
    match message {
        Some(message) => format!(
            r#"<div id="{ERROR_ID}" class="mt-4 text-red-500 text-center" role="alert">{}</div>"#,
            html_escape(message)
        ),
        None => format!(r#"<div id="{ERROR_ID}"></div>"#),
    }
}

/// Renders the notice shown when a completed search found nothing.
pub fn no_results() -> String {
    r#"<div class="text-center text-gray-500 mt-8">No results found. Try a different search term.</div>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            name: "Roadster <Men> Blue Jeans".to_string(),
            price: 1299.0,
            brand: "Roadster".to_string(),
            description: "Mid-rise & stretchable".to_string(),
            image_url: "https://img.test/jeans.jpg".to_string(),
            similarity_score: 0.8734,
        }
    }

    #[test]
    fn test_card_fields() {
        let html = product_card(&product());

        assert!(html.contains("Roadster &lt;Men&gt; Blue Jeans"));
        assert!(html.contains("₹1,299"));
        assert!(html.contains("87.3% match"));
        assert!(html.contains("Mid-rise &amp; stretchable"));
        assert!(html.contains("line-clamp-2"));
        assert!(html.contains("line-clamp-3"));
        assert!(html.contains(r#"src="https://img.test/jeans.jpg""#));
    }

    #[test]
    fn test_card_image_fallback() {
        let html = product_card(&product());
        assert!(html.contains("this.src='/api/placeholder/400/400'"));

        let blank = Product {
            image_url: String::new(),
            ..product()
        };
        assert!(product_card(&blank).contains(r#"src="/api/placeholder/400/400""#));
    }

    #[test]
    fn test_grid_keeps_order() {
        let mut second = product();
        second.name = "Second".to_string();
        let html = product_grid(&[product(), second]);

        assert!(html.starts_with(r#"<div id="results""#));
        let first_at = html.find("Roadster &lt;Men&gt;").unwrap();
        let second_at = html.find("Second").unwrap();
        assert!(first_at < second_at);
    }

    #[test]
    fn test_load_more_control() {
        assert_eq!(load_more_control("jeans", None), r#"<div id="load-more"></div>"#);

        let html = load_more_control("blue jeans", Some(2));
        assert!(html.contains("/htmx/search?query=blue%20jeans&amp;page=2"));
        assert!(html.contains("Load More Results"));
    }

    #[test]
    fn test_load_more_joins_search_form_queue() {
        let html = load_more_control("blue jeans", Some(2));
        assert!(html.contains(r##"hx-sync="#search-form:drop""##));
    }

    #[test]
    fn test_error_alert() {
        assert_eq!(error_alert(None), r#"<div id="search-error"></div>"#);
        assert!(error_alert(Some("Failed")).contains(r#"role="alert""#));
    }
}
