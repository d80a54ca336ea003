use super::config::Language;

/// Internationalization support for UI text
pub struct I18n {
    language: Language,
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    #[cfg(test)]
    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        match self.language {
            Language::English => english(key),
            Language::Japanese => japanese(key).unwrap_or_else(|| english(key)),
        }
    }
}

fn english(key: &str) -> &str {
    match key {
        "app.title" => "Todo List",

        // Input card
        "input.title" => "New Todo",
        "input.placeholder" => "Type a todo and press Enter",

        // List card
        "list.title" => "Todos",
        "list.empty" => "Nothing to do yet",
        "progress.completed" => "completed",

        // Header
        "header.items" => "items",
        "header.saved" => "saved",
        "header.unsaved" => "unsaved",

        // Notices
        "notice.save_failed" => "Could not save your todos",
        "notice.load_failed" => "Could not load saved todos",
        "notice.added" => "Todo added",
        "notice.config_failed" => "Could not save settings",
        "notice.theme_changed" => "Theme changed to",

        // Controls
        "controls.title" => "Controls",
        "controls.add" => "add",
        "controls.toggle" => "toggle",
        "controls.focus" => "focus",
        "controls.navigation" => "move",
        "controls.theme" => "theme",
        "controls.language" => "language",
        "controls.help" => "help",
        "controls.quit" => "quit",

        // Help overlay
        "help.title" => "Help",
        "help.line1" => "Type in the input box and press Enter to add a todo.",
        "help.line2" => "New todos appear at the top of the list.",
        "help.line3" => "Tab switches between the input box and the list.",
        "help.line4" => "In the list, Enter or Space marks a todo done or not done.",
        "help.line5" => "Every change is saved on this device automatically.",
        "help.line6" => "Press ? or Esc to close this help.",

        _ => key, // Fallback to key if not found
    }
}

fn japanese(key: &str) -> Option<&'static str> {
    let text = match key {
        "app.title" => "TODOアプリ",
        "input.title" => "新しいTODO",
        "input.placeholder" => "TODOを入力してEnter",
        "list.title" => "TODO一覧",
        "list.empty" => "TODOはまだありません",
        "progress.completed" => "完了",
        "header.items" => "件",
        "header.saved" => "保存済み",
        "header.unsaved" => "未保存",
        "notice.save_failed" => "TODOを保存できませんでした",
        "notice.load_failed" => "保存されたTODOを読み込めませんでした",
        "notice.added" => "TODOを追加しました",
        "notice.config_failed" => "設定を保存できませんでした",
        "notice.theme_changed" => "テーマを変更しました:",
        "controls.title" => "操作",
        "controls.add" => "追加",
        "controls.toggle" => "完了切替",
        "controls.focus" => "フォーカス",
        "controls.navigation" => "移動",
        "controls.theme" => "テーマ",
        "controls.language" => "言語",
        "controls.help" => "ヘルプ",
        "controls.quit" => "終了",
        "help.title" => "ヘルプ",
        "help.line1" => "入力欄に入力してEnterでTODOを追加します。",
        "help.line2" => "新しいTODOは一覧の先頭に表示されます。",
        "help.line3" => "Tabで入力欄と一覧を切り替えます。",
        "help.line4" => "一覧ではEnterかSpaceで完了/未完了を切り替えます。",
        "help.line5" => "変更はすべて自動的に端末へ保存されます。",
        "help.line6" => "?かEscでヘルプを閉じます。",
        _ => return None,
    };
    Some(text)
}
