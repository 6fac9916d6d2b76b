#[cfg(test)]
mod tests {
    use crate::quick_links::sort_by_clicks;
    use newtab_common::LinkItem;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_sort_is_descending_and_stable(clicks in prop::collection::vec(0u32..5, 0..40)) {
            let mut links: Vec<LinkItem> = clicks
                .iter()
                .enumerate()
                .map(|(i, c)| LinkItem { clicks: *c, ..LinkItem::new(i.to_string(), "t", "https://t") })
                .collect();

            sort_by_clicks(&mut links);

            for pair in links.windows(2) {
                prop_assert!(pair[0].clicks >= pair[1].clicks);
                if pair[0].clicks == pair[1].clicks {
                    let a: usize = pair[0].id.parse().unwrap();
                    let b: usize = pair[1].id.parse().unwrap();
                    prop_assert!(a < b);
                }
            }
        }
    }
}
