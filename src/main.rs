use std::io;

use search_template_gen::pipeline::{PipelineOptions, PipelineRequest, run_pipeline};

/// The sample catalog the demo runs against.
const SAMPLE_DOCUMENT: &str = r#"
{
  "store": {
    "book": [
      {
        "title": "The Catcher in the Rye",
        "author": "J.D. Salinger",
        "price": 15.99
      },
      {
        "title": "To Kill a Mockingbird",
        "author": "Harper Lee",
        "price": 12.50
      }
    ],
    "bicycle": {
      "color": "red",
      "price": 199.99
    }
  }
}
"#;

/// Projects every book into `{Title, Price}` records.
const BOOK_QUERY: &str = "store.book[*].{Title: title, Price: price}";

const TITLE_FIELD: &str = "Title";
const PRICE_FIELD: &str = "Price";

/// Books at or above this price get no template.
const PRICE_CEILING: f64 = 15.0;

fn main() -> anyhow::Result<()> {
    let request = PipelineRequest::new(BOOK_QUERY, TITLE_FIELD, PRICE_FIELD, PRICE_CEILING);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_pipeline(SAMPLE_DOCUMENT, &request, &mut out, &PipelineOptions::default())?;
    Ok(())
}
