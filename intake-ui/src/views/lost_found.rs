use std::fmt;

use intake_core::{LostItemForm, Screen, SearchRecord, Station};

use super::busy_label;
use crate::session::LostFoundSnapshot;

/// The screen a lost-and-found snapshot is on, as text.
pub struct LostFoundView<'a>(pub &'a LostFoundSnapshot);

impl fmt::Display for LostFoundView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        match snapshot.screen {
            Screen::Landing => landing(f),
            Screen::Form => form(f, snapshot),
            Screen::Search => search(f, snapshot),
            Screen::SearchResults => results(f, &snapshot.search_results),
            Screen::NoResults => no_results(f),
            Screen::Success => success(f),
        }
    }
}

pub fn render_lost_found(snapshot: &LostFoundSnapshot) -> String {
    LostFoundView(snapshot).to_string()
}

fn landing(out: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(out, "== Найдите потерянную вещь в метро за 3 шага ==")?;
    writeln!(out, "1. Опишите: расскажите, что вы потеряли")?;
    writeln!(out, "2. Добавьте фото: загрузите изображение предмета")?;
    writeln!(out, "3. Получите уведомление: система найдет совпадения")?;
    writeln!(out, "[ Подать заявку ]  [ Начать поиск ]")
}

fn form(out: &mut fmt::Formatter<'_>, snapshot: &LostFoundSnapshot) -> fmt::Result {
    let LostItemForm {
        description,
        date,
        location,
        photos,
        accepted_rules,
    } = &snapshot.form;

    writeln!(out, "== Подача заявки о потере ==")?;
    writeln!(out, "Что вы потеряли? *  {description}")?;
    writeln!(out, "Дата потери *       {}", date.map(|d| d.to_string()).unwrap_or_default())?;
    writeln!(
        out,
        "Станция метро *     {}",
        location.as_ref().map(Station::as_str).unwrap_or("Выберите станцию")
    )?;
    writeln!(out, "Фото (максимум 3 шт., до 5 МБ): {}", photos.len())?;
    for photo in photos {
        writeln!(out, "  - {} ({} bytes)", photo.name, photo.size)?;
    }
    for refused in &snapshot.rejected_uploads {
        writeln!(out, "  ! {refused}")?;
    }
    writeln!(
        out,
        "[{}] Я ознакомлен с правилами сервиса",
        if *accepted_rules { "x" } else { " " }
    )?;
    writeln!(
        out,
        "{}  [ Назад ]",
        busy_label(snapshot.is_submitting, "Отправить заявку", "Отправка...")
    )
}

fn search(out: &mut fmt::Formatter<'_>, snapshot: &LostFoundSnapshot) -> fmt::Result {
    writeln!(out, "== Поиск потерянных вещей ==")?;
    writeln!(out, "Поиск по описанию или станции метро: {}", snapshot.search_query)?;
    writeln!(out, "{}", busy_label(snapshot.is_searching, "Искать", "Поиск..."))
}

fn results(out: &mut fmt::Formatter<'_>, records: &[SearchRecord]) -> fmt::Result {
    writeln!(out, "== Результаты поиска ==")?;
    if records.is_empty() {
        writeln!(out, "Совпадений не найдено")?;
        return writeln!(out, "[ Изменить запрос ]");
    }
    writeln!(out, "Найдено совпадений: {}", records.len())?;
    for record in records {
        writeln!(
            out,
            "#{} {} | {} | {}",
            record.id, record.description, record.location, record.date
        )?;
    }
    Ok(())
}

fn no_results(out: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(out, "== Ничего не найдено ==")?;
    writeln!(
        out,
        "Пока мы не нашли совпадений. Попробуйте уточнить параметры или проверьте заявку позже"
    )?;
    writeln!(out, "[ Изменить запрос ]")
}

fn success(out: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(out, "== Заявка отправлена! ==")?;
    writeln!(out, "Мы уведомим вас, если найдем совпадения")?;
    writeln!(out, "[ Вернуться на главную ]")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use intake_core::{PhotoHandle, UploadRejected};

    use super::*;

    fn snapshot(screen: Screen) -> LostFoundSnapshot {
        LostFoundSnapshot {
            screen,
            form: LostItemForm::default(),
            search_query: String::new(),
            search_results: Vec::new(),
            is_submitting: false,
            is_searching: false,
            rejected_uploads: Vec::new(),
            submitted: Vec::new(),
        }
    }

    #[test]
    fn form_shows_fields_rejections_and_busy_button() {
        let mut snap = snapshot(Screen::Form);
        snap.form.description = "кошелек".to_string();
        snap.form.date = NaiveDate::from_ymd_opt(2023, 9, 15);
        snap.form.location = Some(Station::Pushkinskaya);
        snap.form.photos = vec![PhotoHandle::new("a.jpg", 10)];
        snap.rejected_uploads = vec![UploadRejected {
            name: "big.jpg".to_string(),
            size: 6_000_000,
            limit: 5_242_880,
        }];
        snap.is_submitting = true;

        let text = render_lost_found(&snap);

        assert!(text.contains("кошелек"));
        assert!(text.contains("2023-09-15"));
        assert!(text.contains("Пушкинская"));
        assert!(text.contains("a.jpg"));
        assert!(text.contains("big.jpg"));
        assert!(text.contains("[Отправка...]"));
    }

    #[test]
    fn empty_results_say_so() {
        let text = render_lost_found(&snapshot(Screen::SearchResults));

        assert!(text.contains("Совпадений не найдено"));
    }

    #[test]
    fn results_list_every_record() {
        let mut snap = snapshot(Screen::SearchResults);
        snap.search_results = intake_data::demo_records();

        let text = render_lost_found(&snap);

        assert!(text.contains("Найдено совпадений: 2"));
        assert!(text.contains("#1 "));
        assert!(text.contains("#2 "));
    }
}
