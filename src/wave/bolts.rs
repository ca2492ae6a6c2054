use super::models::Bolt;

/// Bolts in flight. Order carries no meaning.
#[derive(Clone, Debug, Default)]
pub struct BoltRegistry {
    bolts: Vec<Bolt>,
}

impl BoltRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn spawn(&mut self, bolt: Bolt) {
        self.bolts.push(bolt);
    }

    pub fn len(&self) -> usize {
        self.bolts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bolts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bolt> {
        self.bolts.iter()
    }

    pub fn has_player_bolt(&self) -> bool {
        self.bolts.iter().any(Bolt::is_player_owned)
    }

    pub(crate) fn clear(&mut self) {
        self.bolts.clear();
    }

    /// Removes every bolt `hit` returns true for and returns how many went.
    /// Each bolt is offered to `hit` exactly once, in order.
    pub(crate) fn consume(&mut self, mut hit: impl FnMut(&Bolt) -> bool) -> usize {
        let before = self.bolts.len();
        self.bolts.retain(|bolt| !hit(bolt));
        before - self.bolts.len()
    }

    /// Moves every bolt one frame and drops those that left the play area.
    pub(crate) fn advance(&mut self) -> usize {
        for bolt in &mut self.bolts {
            bolt.advance();
        }
        self.consume(|bolt| !bolt.in_play())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn consume_visits_every_bolt_once() {
        let mut bolts = BoltRegistry::new();
        for i in 0..6 {
            bolts.spawn(Bolt::alien(i as f64, 100.0));
        }
        let mut seen = Vec::new();
        let removed = bolts.consume(|bolt| {
            seen.push(bolt.x());
            bolt.x() as u32 % 2 == 0
        });
        assert_eq!(removed, 3);
        assert_eq!(seen, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let left: Vec<f64> = bolts.iter().map(Bolt::x).collect();
        assert_eq!(left, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn advance_prunes_both_ends() {
        let mut bolts = BoltRegistry::new();
        bolts.spawn(Bolt::player(10.0, GAME_HEIGHT));
        bolts.spawn(Bolt::alien(20.0, 5.0));
        bolts.spawn(Bolt::player(30.0, 300.0));
        assert_eq!(bolts.advance(), 2);
        assert_eq!(bolts.len(), 1);
        assert_eq!(bolts.iter().next().map(Bolt::y), Some(300.0 + BOLT_SPEED));
    }

    #[test]
    fn tracks_player_bolt_presence() {
        let mut bolts = BoltRegistry::new();
        bolts.spawn(Bolt::alien(0.0, 300.0));
        assert!(!bolts.has_player_bolt());
        bolts.spawn(Bolt::player(0.0, 300.0));
        assert!(bolts.has_player_bolt());
        bolts.clear();
        assert!(bolts.is_empty());
    }
}
