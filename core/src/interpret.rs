use crate::decoder::MorseDecoder;
use crate::types::*;
use std::fmt;
use std::sync::mpsc::Sender;

type LetterObserver = Box<dyn FnMut(char) + Send>;
type WordObserver = Box<dyn FnMut(&str) + Send>;

/// Demonstration keying of `... --- ...` with the default timing.
pub const SOS_SEQUENCE: &[PressGap] = &[
    PressGap::new(0.1, 0.2),
    PressGap::new(0.1, 0.2),
    PressGap::new(0.1, 0.9),
    PressGap::new(0.6, 0.2),
    PressGap::new(0.6, 0.2),
    PressGap::new(0.6, 0.9),
    PressGap::new(0.1, 0.2),
    PressGap::new(0.1, 0.2),
    PressGap::new(0.1, 2.0),
];

/// Whether the key is currently held down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyState {
    Idle,
    Pressed { since: f64 },
}

/// State machine turning timestamped key events into letters and words.
///
/// The interpreter never reads a clock: every operation takes the current
/// time in seconds from the caller, who must supply non-decreasing
/// timestamps and call [`idle_tick`](Self::idle_tick) regularly (see
/// [`TimingConfig::poll_interval`]) so that letter and word gaps are noticed.
///
/// Completed letters go to the letter observer. Completed words go to the
/// word observer, or to stdout when none is registered. Malformed input
/// never fails; unknown codes decode to [`crate::UNKNOWN`].
pub struct MorseInterpreter {
    decoder: MorseDecoder,
    config: TimingConfig,
    key: KeyState,
    current_symbol: Vec<MorseSymbol>,
    current_word: String,
    last_release: Option<f64>,
    last_timestamp: Option<f64>,
    on_letter: Option<LetterObserver>,
    on_word: Option<WordObserver>,
}

impl fmt::Debug for MorseInterpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MorseInterpreter")
            .field("config", &self.config)
            .field("key", &self.key)
            .field("current_symbol", &symbols_to_string(&self.current_symbol))
            .field("current_word", &self.current_word)
            .field("last_release", &self.last_release)
            .finish_non_exhaustive()
    }
}

impl Default for MorseInterpreter {
    fn default() -> Self {
        Self::new(MorseDecoder::default(), TimingConfig::default())
    }
}

impl MorseInterpreter {
    pub fn new(decoder: MorseDecoder, config: TimingConfig) -> Self {
        for issue in config.check() {
            tracing::warn!(?config, %issue, "timing thresholds overlap");
        }

        Self {
            decoder,
            config,
            key: KeyState::Idle,
            current_symbol: Vec::new(),
            current_word: String::new(),
            last_release: None,
            last_timestamp: None,
            on_letter: None,
            on_word: None,
        }
    }

    pub fn with_letter_observer(mut self, observer: impl FnMut(char) + Send + 'static) -> Self {
        self.set_letter_observer(observer);
        self
    }

    pub fn with_word_observer(mut self, observer: impl FnMut(&str) + Send + 'static) -> Self {
        self.set_word_observer(observer);
        self
    }

    /// Send every completed letter and word into `sender`, in order.
    pub fn with_channel(mut self, sender: Sender<Decoded>) -> Self {
        let letters = sender.clone();
        self.set_letter_observer(move |letter| {
            // Receiver may be gone
            let _ = letters.send(Decoded::Letter(letter));
        });
        self.set_word_observer(move |word| {
            let _ = sender.send(Decoded::Word(word.to_string()));
        });
        self
    }

    pub fn set_letter_observer(&mut self, observer: impl FnMut(char) + Send + 'static) {
        self.on_letter = Some(Box::new(observer));
    }

    pub fn set_word_observer(&mut self, observer: impl FnMut(&str) + Send + 'static) {
        self.on_word = Some(Box::new(observer));
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    pub fn decoder(&self) -> &MorseDecoder {
        &self.decoder
    }

    pub fn key_state(&self) -> KeyState {
        self.key
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.key, KeyState::Pressed { .. })
    }

    /// Symbols of the letter being keyed, e.g. `"-.-"`.
    pub fn pending_symbols(&self) -> String {
        symbols_to_string(&self.current_symbol)
    }

    /// Letters of the word being keyed.
    pub fn pending_word(&self) -> &str {
        &self.current_word
    }

    /// Key went down.
    ///
    /// Pressing again without a release restarts the press at `timestamp`.
    pub fn press(&mut self, timestamp: f64) {
        self.observe(timestamp);

        if let KeyState::Pressed { since } = self.key {
            tracing::debug!(since, timestamp, "press while already pressed, restarting");
        }
        self.key = KeyState::Pressed { since: timestamp };
    }

    /// Key went up. Ignored if the key was not down.
    pub fn release(&mut self, timestamp: f64) {
        self.observe(timestamp);

        let KeyState::Pressed { since } = self.key else {
            tracing::debug!(timestamp, "release without press ignored");
            return;
        };

        let duration = (timestamp - since).max(0.0);
        let symbol = self.config.classify_press(duration);
        tracing::trace!(duration, ?symbol);

        self.current_symbol.push(symbol);
        self.key = KeyState::Idle;
        self.last_release = Some(timestamp);
    }

    /// Re-evaluate the gap since the last release and flush what it concludes.
    ///
    /// Does nothing while the key is down or before the first release.
    pub fn idle_tick(&mut self, timestamp: f64) {
        self.observe(timestamp);

        if self.is_pressed() {
            return;
        }
        let Some(last_release) = self.last_release else {
            return;
        };

        let gap = (timestamp - last_release).max(0.0);
        match self.config.classify_idle(gap) {
            Boundary::Word => {
                self.flush_letter();
                self.flush_word();
            }
            Boundary::Letter => self.flush_letter(),
            Boundary::None => {}
        }
    }

    pub fn handle(&mut self, event: &MorseEvent) {
        match *event {
            MorseEvent::Press { at } => self.press(at),
            MorseEvent::Release { at } => self.release(at),
            MorseEvent::IdleTick { at } => self.idle_tick(at),
        }
    }

    pub fn replay<'a>(&mut self, events: impl IntoIterator<Item = &'a MorseEvent>) {
        for event in events {
            self.handle(event);
        }
    }

    /// Key a sequence of press/gap steps starting at `start`, idle-ticking
    /// after each gap, then tick once more a full word gap later so the
    /// last word is flushed. Returns the time of that final tick.
    pub fn simulate(&mut self, start: f64, steps: &[PressGap]) -> f64 {
        let mut now = start;
        for step in steps {
            self.press(now);
            let released = now + step.press;
            self.release(released);
            now = released + step.gap;
            self.idle_tick(now);
        }

        let end = now + self.config.word_gap;
        self.idle_tick(end);
        end
    }

    /// Flush the pending letter and word regardless of timing, e.g. at the
    /// end of an input stream.
    pub fn finish(&mut self) {
        self.flush_letter();
        self.flush_word();
    }

    /// Drop all buffered input without notifying anybody.
    pub fn reset(&mut self) {
        self.key = KeyState::Idle;
        self.current_symbol.clear();
        self.current_word.clear();
        self.last_release = None;
        self.last_timestamp = None;
    }

    fn observe(&mut self, timestamp: f64) {
        if let Some(previous) = self.last_timestamp {
            if timestamp < previous {
                tracing::warn!(previous, timestamp, "timestamp went backwards");
                return;
            }
        }
        self.last_timestamp = Some(timestamp);
    }

    fn flush_letter(&mut self) {
        if self.current_symbol.is_empty() {
            return;
        }

        let letter = self.decoder.decode_symbols(&self.current_symbol);
        tracing::debug!(code = %symbols_to_string(&self.current_symbol), %letter, "letter");

        self.current_word.push(letter);
        self.current_symbol.clear();

        if let Some(on_letter) = &mut self.on_letter {
            on_letter(letter);
        }
    }

    fn flush_word(&mut self) {
        if self.current_word.is_empty() {
            return;
        }

        let word = std::mem::take(&mut self.current_word);
        tracing::debug!(%word, "word");

        match &mut self.on_word {
            Some(on_word) => on_word(&word),
            None => println!("{word}"),
        }
    }
}
