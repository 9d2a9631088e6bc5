use serde_json::json;

/// Narration for the current call plus the whole-battle transcript.
///
/// The transcript also carries `|turn|N` markers so two runs can be compared
/// line by line.
#[derive(Clone, Debug, Default)]
pub struct BattleLogger {
    turn_lines: Vec<String>,
    transcript: Vec<String>,
}

impl BattleLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_turn(&mut self, turn: u32) {
        self.turn_lines.clear();
        self.transcript.push(format!("|turn|{turn}"));
    }

    /// Starts a fresh batch of narration that does not open a new turn
    /// (replacements, captures, refused flee attempts).
    pub fn begin_segment(&mut self) {
        self.turn_lines.clear();
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        self.transcript.push(line.clone());
        self.turn_lines.push(line);
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = String>) {
        for line in lines {
            self.push(line);
        }
    }

    pub fn turn_lines(&self) -> &[String] {
        &self.turn_lines
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn to_json(&self) -> serde_json::Value {
        let turns = self
            .transcript
            .iter()
            .filter(|line| line.starts_with("|turn|"))
            .count();
        json!({
            "turns": turns,
            "log": self.transcript,
        })
    }
}
