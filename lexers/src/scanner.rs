#![deny(warnings)]

/// A backtrackable cursor over a lazily pulled stream of items.
///
/// `pos` is the index of the last consumed item within `buf`, `-1` when
/// nothing has been consumed since the last `extract`/`ignore`. Items are
/// pulled from `src` only as far as the cursor needs them.
pub struct Scanner<T: Clone> {
    src: Box<dyn Iterator<Item = T>>,
    buf: Vec<T>,
    pos: isize,
}

impl<T: Clone> Iterator for Scanner<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        if !self.fill_to(self.pos + 1) {
            return None;
        }
        self.pos += 1;
        self.curr()
    }
}

impl<T: Clone> Scanner<T> {
    pub fn new<I>(source: I) -> Scanner<T> where I: Iterator<Item = T> + 'static {
        Scanner{src: Box::new(source), buf: Vec::new(), pos: -1}
    }

    pub fn pos(&self) -> isize { self.pos }

    pub fn set_pos(&mut self, pos: isize) -> bool {
        if pos < -1 || pos >= (self.buf.len() as isize) {
            return false;
        }
        self.pos = pos;
        true
    }

    pub fn curr(&self) -> Option<T> {
        if self.pos < 0 {
            return None;
        }
        self.buf.get(self.pos as usize).cloned()
    }

    // pull items from the source until buf[idx] exists
    fn fill_to(&mut self, idx: isize) -> bool {
        while idx >= (self.buf.len() as isize) {
            match self.src.next() {
                Some(item) => self.buf.push(item),
                None => return false,
            }
        }
        true
    }

    pub fn prev(&mut self) -> Option<T> {
        if self.pos >= 0 { self.pos -= 1; }
        self.curr()
    }

    pub fn peek(&mut self) -> Option<T> {
        if !self.fill_to(self.pos + 1) {
            return None;
        }
        self.buf.get((self.pos + 1) as usize).cloned()
    }

    /// True when every item of the source has been consumed.
    pub fn is_done(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Items consumed since the last `extract` or `ignore`.
    pub fn view(&self) -> &[T] {
        &self.buf[..(self.pos + 1) as usize]
    }

    /// Drop consumed items, the cursor restarts right after them.
    pub fn ignore(&mut self) {
        let consumed = (self.pos + 1) as usize;
        self.buf = self.buf.split_off(consumed);
        self.pos = -1;
    }

    pub fn extract(&mut self) -> Vec<T> {
        let consumed = (self.pos + 1) as usize;
        self.pos = -1;
        self.buf.drain(..consumed).collect()
    }
}

impl<T: Clone + PartialEq> Scanner<T> {
    pub fn accept(&mut self, what: &T) -> Option<T> {
        match self.peek() {
            Some(ref next) if next == what => self.next(),
            _ => None,
        }
    }

    // Advance only if the next item is in the 'any' set
    pub fn accept_any(&mut self, any: &[T]) -> Option<T> {
        match self.peek() {
            Some(ref next) if any.contains(next) => self.next(),
            _ => None,
        }
    }

    // Skip over the 'over' set, result is whether the scanner advanced
    pub fn skip_all(&mut self, over: &[T]) -> bool {
        let mut advanced = false;
        while self.accept_any(over).is_some() { advanced = true; }
        advanced
    }

    // Advance up to (not including) an item in the 'any' set or EOF
    pub fn until_any(&mut self, any: &[T]) -> bool {
        let mut advanced = false;
        while let Some(next) = self.peek() {
            if any.contains(&next) { break; }
            self.next();
            advanced = true;
        }
        advanced
    }
}
