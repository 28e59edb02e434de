use raidsight_types::{Fight, FightScope};

/// Narrow a report's fight list (most recent first) to the selected scope.
///
/// `BossOnly` currently resolves like `AllFights`; encounter metadata that
/// would let us tell bosses from trash is not wired up yet.
pub fn resolve_scope(fights: &[Fight], scope: FightScope) -> &[Fight] {
    let count = match scope {
        FightScope::MostRecent => 1,
        FightScope::LastThree => 3,
        FightScope::LastFive => 5,
        FightScope::AllFights | FightScope::BossOnly => fights.len(),
    };
    &fights[..count.min(fights.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fights(n: usize) -> Vec<Fight> {
        (0..n)
            .map(|i| Fight::new(i as i32 + 1, i as i64 * 1000, i as i64 * 1000 + 500))
            .collect()
    }

    #[test]
    fn most_recent_takes_the_first_fight() {
        let list = fights(4);
        let scoped = resolve_scope(&list, FightScope::MostRecent);
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].id, 1);
    }

    #[test]
    fn last_three_and_five_take_prefixes() {
        let list = fights(10);
        assert_eq!(resolve_scope(&list, FightScope::LastThree).len(), 3);
        assert_eq!(resolve_scope(&list, FightScope::LastFive).len(), 5);
    }

    #[test]
    fn short_lists_are_not_padded() {
        let list = fights(2);
        assert_eq!(resolve_scope(&list, FightScope::LastFive).len(), 2);
        assert!(resolve_scope(&[], FightScope::MostRecent).is_empty());
    }

    #[test]
    fn boss_only_matches_all_fights() {
        let list = fights(6);
        assert_eq!(
            resolve_scope(&list, FightScope::BossOnly),
            resolve_scope(&list, FightScope::AllFights)
        );
    }
}
