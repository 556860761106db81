const MIN_STEP_MS: u64 = 16;

/// Types words out one character at a time, pauses, deletes them again and
/// moves on to the next word.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingAnimation {
    words: Vec<String>,
    speed_ms: u64,
    pause_ms: u64,
    looping: bool,
    word: usize,
    chars: usize,
    deleting: bool,
    next_ms: Option<u64>,
}

impl TypingAnimation {
    pub fn new(words: Vec<String>, speed_ms: u64, pause_ms: u64, looping: bool) -> Self {
        let words = if words.is_empty() {
            vec![String::new()]
        } else {
            words
        };
        Self {
            words,
            speed_ms,
            pause_ms: pause_ms.max(MIN_STEP_MS),
            looping,
            word: 0,
            chars: 0,
            deleting: false,
            next_ms: None,
        }
    }

    pub fn single(word: &str, speed_ms: u64, pause_ms: u64) -> Self {
        Self::new(vec![word.to_owned()], speed_ms, pause_ms, false)
    }

    pub fn start(&mut self, now_ms: u64) {
        self.word = 0;
        self.chars = 0;
        self.deleting = false;
        self.schedule(now_ms);
    }

    /// Replaces the words and restarts from an empty line.
    pub fn restart_with(&mut self, words: Vec<String>, now_ms: u64) {
        *self = Self::new(words, self.speed_ms, self.pause_ms, self.looping);
        self.start(now_ms);
    }

    pub fn stop(&mut self) {
        self.next_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_ms.is_some()
    }

    pub fn displayed(&self) -> String {
        self.current_word().chars().take(self.chars).collect()
    }

    fn current_word(&self) -> &str {
        self.words.get(self.word).map(String::as_str).unwrap_or("")
    }

    fn current_len(&self) -> usize {
        self.current_word().chars().count()
    }

    fn is_last_word(&self) -> bool {
        self.word + 1 >= self.words.len()
    }

    /// Delay before the action implied by the current state, `None` once done.
    fn delay(&self) -> Option<u64> {
        if self.deleting {
            if self.chars > 0 {
                Some(MIN_STEP_MS.max(self.speed_ms / 2))
            } else {
                Some(0)
            }
        } else if self.chars < self.current_len() {
            Some(MIN_STEP_MS.max(self.speed_ms))
        } else if !self.looping && self.is_last_word() {
            None
        } else {
            Some(self.pause_ms)
        }
    }

    fn schedule(&mut self, from_ms: u64) {
        self.next_ms = self.delay().map(|d| from_ms.saturating_add(d));
    }

    fn fire(&mut self) {
        if self.deleting {
            if self.chars > 0 {
                self.chars -= 1;
            } else {
                self.deleting = false;
                if !self.is_last_word() {
                    self.word += 1;
                } else if self.looping {
                    self.word = 0;
                }
            }
        } else if self.chars < self.current_len() {
            self.chars += 1;
        } else {
            self.deleting = true;
        }
    }

    /// Runs every action due by `now_ms`. Returns whether the visible text changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let before = (self.word, self.chars);
        while let Some(due) = self.next_ms
            && due <= now_ms
        {
            self.fire();
            self.schedule(due);
        }
        before != (self.word, self.chars)
    }
}
