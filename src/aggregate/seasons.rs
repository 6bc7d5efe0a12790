use crate::models::EpisodeId;

/// Number of episodes in each season, in the order seasons first appear
///
/// Seasons are counted as consecutive runs, so the input should be ordered
/// by season.
pub fn episodes_per_season(episodes: &[EpisodeId]) -> Vec<(u32, usize)> {
    let mut counts: Vec<(u32, usize)> = Vec::new();

    for episode in episodes {
        match counts.last_mut() {
            Some((season, count)) if *season == episode.season_num => *count += 1,
            _ => counts.push((episode.season_num, 1)),
        }
    }

    counts
}

/// Display label for a season
pub fn season_label(season_num: u32) -> String {
    format!("Season {}", season_num)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episodes_per_season() {
        let episodes = [
            EpisodeId::new(1, 1),
            EpisodeId::new(1, 2),
            EpisodeId::new(1, 3),
            EpisodeId::new(2, 1),
            EpisodeId::new(8, 1),
            EpisodeId::new(8, 2),
        ];

        assert_eq!(episodes_per_season(&episodes), vec![(1, 3), (2, 1), (8, 2)]);
        assert_eq!(season_label(8), "Season 8");
    }

    #[test]
    fn test_no_episodes() {
        assert!(episodes_per_season(&[]).is_empty());
    }
}
