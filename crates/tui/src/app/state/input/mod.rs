/// Single-line text field used by the login form.
#[derive(Default)]
pub struct InputState {
    pub buffer: Vec<char>,
    pub cursor: usize,
}

impl InputState {
    pub fn current(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn masked_clone(&self, mask: char) -> Self {
        Self {
            buffer: self.buffer.iter().map(|_| mask).collect(),
            cursor: self.cursor.min(self.buffer.len()),
        }
    }

    pub fn set_from(&mut self, value: &str) {
        self.buffer = value.chars().collect();
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, value: &str) {
        for ch in value.chars() {
            self.buffer.insert(self.cursor, ch);
            self.cursor += 1;
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.buffer.remove(self.cursor);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.buffer.len() {
            return;
        }
        self.buffer.remove(self.cursor);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn kill_to_end(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.truncate(self.cursor);
        }
    }

    pub fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        while self.cursor > 0 && self.buffer[self.cursor - 1].is_whitespace() {
            self.cursor -= 1;
            self.buffer.remove(self.cursor);
        }
        while self.cursor > 0 && !self.buffer[self.cursor - 1].is_whitespace() {
            self.cursor -= 1;
            self.buffer.remove(self.cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InputState;

    #[test]
    fn insert_and_backspace_follow_cursor() {
        let mut input = InputState::default();
        input.insert_str("alce");
        input.move_left();
        input.move_left();
        input.insert_char('i');
        assert_eq!(input.current(), "alice");
        assert_eq!(input.cursor, 3);

        input.move_end();
        input.backspace();
        assert_eq!(input.current(), "alic");
    }

    #[test]
    fn delete_word_back_removes_trailing_word() {
        let mut input = InputState::default();
        input.set_from("pop example.org");
        input.delete_word_back();
        assert_eq!(input.current(), "pop ");
    }

    #[test]
    fn masked_clone_hides_every_character_and_keeps_cursor() {
        let mut input = InputState::default();
        input.set_from("s3cr3t");
        input.cursor = 2;

        let masked = input.masked_clone('*');

        assert_eq!(masked.current(), "******");
        assert_eq!(masked.cursor, 2);
    }
}
