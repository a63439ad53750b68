use crate::shared::BATTLE_LOG_LINES;

// ═══════════════════════════════════════════════════════════════════════
// THROWS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Throw {
    Rock,
    Paper,
    Scissors,
}

impl Throw {
    pub const ALL: [Throw; 3] = [Throw::Rock, Throw::Paper, Throw::Scissors];

    pub fn label(self) -> &'static str {
        match self {
            Throw::Rock => "Rock",
            Throw::Paper => "Paper",
            Throw::Scissors => "Scissors",
        }
    }

    /// Rock smashes scissors, scissors cut paper, paper wraps rock.
    pub fn beats(self, other: Throw) -> bool {
        matches!(
            (self, other),
            (Throw::Rock, Throw::Scissors)
                | (Throw::Scissors, Throw::Paper)
                | (Throw::Paper, Throw::Rock)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundVerdict {
    PlayerHits,
    EnemyHits,
    Draw,
}

/// Judge one round. A draw hurts nobody.
pub fn judge(player: Throw, enemy: Throw) -> RoundVerdict {
    if player == enemy {
        RoundVerdict::Draw
    } else if player.beats(enemy) {
        RoundVerdict::PlayerHits
    } else {
        RoundVerdict::EnemyHits
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ROUND LOG
// ═══════════════════════════════════════════════════════════════════════

/// Rolling commentary, newest line first, capped so the panel never grows.
#[derive(Debug, Clone, Default)]
pub struct BattleLog {
    pub lines: Vec<String>,
}

impl BattleLog {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.insert(0, line.into());
        self.lines.truncate(BATTLE_LOG_LINES);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_throw_beats_exactly_one_other() {
        for throw in Throw::ALL {
            let beaten = Throw::ALL.iter().filter(|t| throw.beats(**t)).count();
            assert_eq!(beaten, 1, "{:?} must beat exactly one throw", throw);
        }
    }

    #[test]
    fn test_judge_full_table() {
        use RoundVerdict::*;
        let table = [
            (Throw::Rock, Throw::Rock, Draw),
            (Throw::Rock, Throw::Paper, EnemyHits),
            (Throw::Rock, Throw::Scissors, PlayerHits),
            (Throw::Paper, Throw::Rock, PlayerHits),
            (Throw::Paper, Throw::Paper, Draw),
            (Throw::Paper, Throw::Scissors, EnemyHits),
            (Throw::Scissors, Throw::Rock, EnemyHits),
            (Throw::Scissors, Throw::Paper, PlayerHits),
            (Throw::Scissors, Throw::Scissors, Draw),
        ];
        for (player, enemy, expected) in table {
            assert_eq!(
                judge(player, enemy),
                expected,
                "{:?} vs {:?}",
                player,
                enemy
            );
        }
    }

    #[test]
    fn test_log_keeps_newest_first() {
        let mut log = BattleLog::default();
        log.push("first");
        log.push("second");
        assert_eq!(log.lines, vec!["second", "first"]);
    }

    #[test]
    fn test_log_caps_line_count() {
        let mut log = BattleLog::default();
        for i in 0..10 {
            log.push(format!("line {}", i));
        }
        assert_eq!(log.lines.len(), BATTLE_LOG_LINES);
        assert_eq!(log.lines[0], "line 9", "newest survives the cap");
        assert_eq!(
            log.lines[BATTLE_LOG_LINES - 1],
            format!("line {}", 10 - BATTLE_LOG_LINES)
        );
    }
}
