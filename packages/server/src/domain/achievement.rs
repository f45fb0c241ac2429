//! Room achievements unlocked by the room-wide completed-session counter.

/// A milestone reached by a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Achievement {
    /// First completed session
    FirstSession,
    /// Four completed sessions (one full cycle)
    Marathon,
}

impl Achievement {
    pub const ALL: [Achievement; 2] = [Achievement::FirstSession, Achievement::Marathon];

    /// Room `sessions_completed` value at which this achievement unlocks
    pub fn threshold(self) -> u32 {
        match self {
            Achievement::FirstSession => 1,
            Achievement::Marathon => 4,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Achievement::FirstSession => "first-session",
            Achievement::Marathon => "marathon",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Achievement::FirstSession => "First Focus Complete!",
            Achievement::Marathon => "Marathon Achiever!",
        }
    }

    /// Achievements whose threshold lies in `(before, after]`.
    pub fn unlocked_between(before: u32, after: u32) -> Vec<Achievement> {
        Self::ALL
            .into_iter()
            .filter(|a| before < a.threshold() && a.threshold() <= after)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlocked_between_reports_each_threshold_once() {
        // テスト項目: しきい値をまたいだときだけ実績が解除される
        // given (前提条件):
        // when (操作):
        let first = Achievement::unlocked_between(0, 1);
        let nothing = Achievement::unlocked_between(1, 2);
        let marathon = Achievement::unlocked_between(3, 4);
        let after_marathon = Achievement::unlocked_between(4, 5);

        // then (期待する結果):
        assert_eq!(first, vec![Achievement::FirstSession]);
        assert!(nothing.is_empty());
        assert_eq!(marathon, vec![Achievement::Marathon]);
        assert!(after_marathon.is_empty());
    }

    #[test]
    fn test_achievement_ids_and_messages() {
        // テスト項目: 実績 ID とメッセージがクライアントの表示と一致する
        assert_eq!(Achievement::FirstSession.id(), "first-session");
        assert_eq!(Achievement::Marathon.id(), "marathon");
        assert_eq!(Achievement::FirstSession.message(), "First Focus Complete!");
        assert_eq!(Achievement::Marathon.message(), "Marathon Achiever!");
    }
}
