//! コード照合エンジン
//!
//! 登録順のコード表と直近2キーの履歴を突き合わせ、最初に一致したアクションを返す。
//!
//! 照合規則:
//! 1. テキスト入力欄へのイベントは履歴にも触れず無視する
//! 2. キー名を正規化して履歴に追加する
//! 3. 登録順に各コードについて「履歴の先頭からの位置一致」または
//!    「単一キーのコードと直前キーの一致」を調べる
//! 4. 最初の一致で履歴をクリアしてアクションを返す
//! 5. 一致せず履歴が上限に達したら履歴をクリアする
//!
//! 一致は「最初に登録されたもの」が優先され、最長一致ではない。

use super::chord::{Chord, KeyHistory};
use super::key::{Key, RawKeyEvent};

/// キー処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum KeyProcessResult<A> {
    /// アクション実行
    Action(A),
    /// 一致なし、履歴は保持（次のキーで2キーのコードと照合する）
    Pending,
    /// マッチなし（履歴は上限到達でクリア済み）
    NoMatch,
    /// テキスト入力中のため無視
    Ignored,
}

/// 照合の内部結果（一致したバインドの添字）
enum MatchOutcome {
    Matched(usize),
    Pending,
    Reset,
    Ignored,
}

/// コード照合器
#[derive(Debug, Clone)]
pub struct ChordMatcher<A> {
    /// 登録順のバインド表
    bindings: Vec<(Chord, A)>,
    /// 直近のキー履歴
    history: KeyHistory,
}

impl<A> ChordMatcher<A> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            history: KeyHistory::new(),
        }
    }

    /// バインドを登録
    ///
    /// 同じ表記が既にあれば、登録順の位置を保ったままアクションを置き換える。
    pub fn register(&mut self, notation: &str, action: A) {
        if let Some(slot) = self
            .bindings
            .iter_mut()
            .find(|(chord, _)| chord.notation() == notation)
        {
            slot.1 = action;
            return;
        }

        let chord = Chord::parse(notation);
        if chord.is_inert() {
            log::debug!("chord {:?} can never match", notation);
        }
        self.bindings.push((chord, action));
    }

    /// 登録済みバインド（登録順）
    pub fn bindings(&self) -> impl Iterator<Item = (&Chord, &A)> {
        self.bindings.iter().map(|(chord, action)| (chord, action))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// 現在のキー履歴
    pub fn history(&self) -> &KeyHistory {
        &self.history
    }

    /// 履歴のリセット
    pub fn reset_history(&mut self) {
        self.history.clear();
    }

    fn match_key(&mut self, event: &RawKeyEvent) -> MatchOutcome {
        if event.target.accepts_text() {
            return MatchOutcome::Ignored;
        }

        let key = Key::normalize(&event.key);
        self.history.push(key.clone());

        let matched = self
            .bindings
            .iter()
            .position(|(chord, _)| chord.matches_history(&self.history) || chord.matches_single(&key));

        if let Some(index) = matched {
            log::debug!("chord {:?} matched", self.bindings[index].0.notation());
            self.history.clear();
            return MatchOutcome::Matched(index);
        }

        if self.history.is_full() {
            self.history.clear();
            MatchOutcome::Reset
        } else {
            MatchOutcome::Pending
        }
    }
}

impl<A: Clone> ChordMatcher<A> {
    /// キー入力を処理してアクションを返す
    pub fn process_key(&mut self, event: &RawKeyEvent) -> KeyProcessResult<A> {
        match self.match_key(event) {
            MatchOutcome::Matched(index) => KeyProcessResult::Action(self.bindings[index].1.clone()),
            MatchOutcome::Pending => KeyProcessResult::Pending,
            MatchOutcome::Reset => KeyProcessResult::NoMatch,
            MatchOutcome::Ignored => KeyProcessResult::Ignored,
        }
    }

    /// キーイベント列を順に処理し、一致したアクションを `handler` に渡す
    pub fn listen<I, F>(&mut self, events: I, mut handler: F)
    where
        I: IntoIterator<Item = RawKeyEvent>,
        F: FnMut(A),
    {
        for event in events {
            if let KeyProcessResult::Action(action) = self.process_key(&event) {
                handler(action);
            }
        }
    }
}

impl<A: FnMut()> ChordMatcher<A> {
    /// コールバック型のバインドを直接呼び出す
    ///
    /// 呼び出した場合は `true`。
    pub fn dispatch(&mut self, event: &RawKeyEvent) -> bool {
        match self.match_key(event) {
            MatchOutcome::Matched(index) => {
                (self.bindings[index].1)();
                true
            }
            _ => false,
        }
    }
}

impl<A> Default for ChordMatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}
