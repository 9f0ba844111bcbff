//! Seed import reporting.
//!
//! The import itself runs during bootstrap on every invocation; this command
//! only reports what happened.

use localshop_storefront::services::SeedOutcome;
use localshop_storefront::ui::PageSeed;

use super::output;

pub fn report(seed: PageSeed) {
    output(&summary(seed));
}

fn summary(seed: PageSeed) -> String {
    match seed {
        PageSeed::NoSource => {
            "No seed source configured (set SHOP_SEED_SOURCE or pass --source).".to_string()
        }
        PageSeed::FlagNotSaved => {
            "Seed import ran but its flag could not be saved; it will run again.".to_string()
        }
        PageSeed::Ran(SeedOutcome::AlreadySeeded) => "Seed list already imported.".to_string(),
        PageSeed::Ran(SeedOutcome::Merged(counts)) => format!(
            "Seed list imported: {} added, {} skipped.",
            counts.added, counts.skipped
        ),
        PageSeed::Ran(SeedOutcome::Failed) => {
            "Seed list could not be loaded; it will not be retried.".to_string()
        }
    }
}
