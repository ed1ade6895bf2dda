//! Property tests for listing extraction and normalization

mod common;

use common::*;
use cruise_scraper_lib::application::to_output_format;
use cruise_scraper_lib::infrastructure::CruiseListParser;
use cruise_scraper_lib::infrastructure::parsing::ListingParseContext;
use proptest::prelude::*;

fn listing_with(cruises: usize, stubs_per_cruise: usize) -> String {
    let hrefs: Vec<String> = (0..stubs_per_cruise).map(|i| format!("/en/show/{i}.html")).collect();
    let boxes: Vec<String> = (0..cruises)
        .map(|c| {
            let stubs: Vec<Stub<'_>> = hrefs
                .iter()
                .map(|href| Stub {
                    route: "Passau \t→ Vienna",
                    days: "5 Days",
                    href,
                })
                .collect();
            cruise_box(&format!("Cruise {c}"), 2019, &stubs)
        })
        .collect();
    listing_page(&boxes)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn cruise_count_is_capped(containers in 0usize..10, cap in 1usize..8) {
        let parser = CruiseListParser::new().unwrap();
        let context = ListingParseContext::new(listing_url()).with_cruise_limit(cap);

        let cruises = parser.parse(&listing_with(containers, 1), &context).unwrap();

        prop_assert_eq!(cruises.len(), containers.min(cap));
        for (i, cruise) in cruises.iter().enumerate() {
            prop_assert_eq!(&cruise.name, &format!("Cruise {i}"));
        }
    }

    #[test]
    fn one_record_per_itinerary(containers in 0usize..5, stubs in 0usize..5) {
        let parser = CruiseListParser::new().unwrap();
        let context = ListingParseContext::new(listing_url());

        let cruises = parser.parse(&listing_with(containers, stubs), &context).unwrap();
        let records = to_output_format(&cruises).unwrap();

        prop_assert_eq!(records.len(), containers.min(4) * stubs);
        prop_assert!(records.iter().all(|r| r.days == 5 && r.dates.is_empty()));
        prop_assert!(records.iter().all(|r| r.itinerary == vec!["Passau", "Vienna"]));
    }
}
