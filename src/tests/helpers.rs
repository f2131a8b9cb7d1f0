use super::Histogram;

pub fn histo64(
    lowest_trackable_value: u64,
    highest_trackable_value: u64,
    significant_figures: u8,
) -> Histogram<u64> {
    Histogram::<u64>::new_with_bounds(
        lowest_trackable_value,
        highest_trackable_value,
        significant_figures,
    )
    .unwrap()
}
