use std::fmt;

use intake_core::{DocumentKind, Gender, PatientForm, Route, Uip};

use super::busy_label;
use crate::session::RegistrationSnapshot;

/// The route a registration snapshot is on, as text.
pub struct RegistrationView<'a>(pub &'a RegistrationSnapshot);

impl fmt::Display for RegistrationView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let form = &snapshot.form;
        match snapshot.route {
            Route::PatientForm => patient_form(f, form, snapshot.can_advance),
            Route::DocumentScan => document_scan(f, form),
            Route::Confirmation => confirmation(f, form, snapshot.is_looking_up),
            Route::RegistrationComplete => complete(f, form),
            Route::UnknownPatient => unknown_patient(f),
        }
    }
}

pub fn render_registration(snapshot: &RegistrationSnapshot) -> String {
    RegistrationView(snapshot).to_string()
}

fn patient_form(
    out: &mut fmt::Formatter<'_>,
    form: &PatientForm,
    can_advance: bool,
) -> fmt::Result {
    writeln!(out, "== Регистрация пациента ==")?;
    writeln!(out, "ФИО:           {}", form.fio)?;
    writeln!(out, "Пол:           {}", gender_label(form.gender))?;
    writeln!(
        out,
        "Дата рождения: {}",
        form.birth_date.map(|d| d.to_string()).unwrap_or_default()
    )?;
    writeln!(out, "Телефон:       {}", form.phone)?;
    writeln!(
        out,
        "[{}] Ручной ввод",
        if form.manual_entry { "x" } else { " " }
    )?;
    let next = if can_advance { "[ Далее ]" } else { "( Далее )" };
    writeln!(out, "{next}  [ Неизвестный пациент ]")
}

fn document_scan(out: &mut fmt::Formatter<'_>, form: &PatientForm) -> fmt::Result {
    writeln!(out, "== Сканирование документов ==")?;
    for kind in DocumentKind::all() {
        let state = form
            .scan(*kind)
            .map(|handle| handle.0.as_str())
            .unwrap_or("не отсканирован");
        writeln!(out, "{:<9} {state}", kind.as_str())?;
    }
    writeln!(out, "[ Далее ]  [ Назад ]")
}

fn confirmation(out: &mut fmt::Formatter<'_>, form: &PatientForm, looking_up: bool) -> fmt::Result {
    writeln!(out, "== Подтверждение данных ==")?;
    writeln!(out, "ФИО:           {}", form.fio)?;
    writeln!(out, "Пол:           {}", gender_label(form.gender))?;
    writeln!(
        out,
        "Документы:     {}",
        DocumentKind::all()
            .iter()
            .filter(|kind| form.scan(**kind).is_some())
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    )?;
    writeln!(
        out,
        "{}  [ Назад ]",
        busy_label(looking_up, "Подтвердить", "Поиск в реестре...")
    )
}

fn complete(out: &mut fmt::Formatter<'_>, form: &PatientForm) -> fmt::Result {
    writeln!(out, "== Регистрация завершена ==")?;
    match &form.uip {
        Uip::Existing(uip) => writeln!(out, "Найден УИП: {uip}")?,
        Uip::Pending => writeln!(out, "УИП будет создан ({})", Uip::PENDING_SENTINEL)?,
        Uip::Unassigned => writeln!(out, "УИП не назначен")?,
    }
    writeln!(out, "[ Новый пациент ]")
}

fn unknown_patient(out: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(out, "== Неизвестный пациент ==")?;
    writeln!(out, "ФИО, пол и дата рождения не требуются")?;
    writeln!(out, "[ Зарегистрировать ]  [ Назад ]")
}

fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "мужской",
        Gender::Female => "женский",
        Gender::Unset => "не указан",
    }
}

#[cfg(test)]
mod tests {
    use intake_core::DocumentHandle;

    use super::*;

    fn snapshot(route: Route, form: PatientForm) -> RegistrationSnapshot {
        RegistrationSnapshot {
            route,
            history: vec![route],
            can_advance: form.can_advance(),
            form,
            is_looking_up: false,
            registered: Vec::new(),
        }
    }

    #[test]
    fn next_button_reflects_the_gate() {
        let blank = render_registration(&snapshot(Route::PatientForm, PatientForm::default()));
        assert!(blank.contains("( Далее )"));

        let named = PatientForm {
            fio: "Иванов Иван".to_string(),
            ..Default::default()
        };
        let text = render_registration(&snapshot(Route::PatientForm, named));
        assert!(text.contains("[ Далее ]"));
        assert!(text.contains("Иванов Иван"));
    }

    #[test]
    fn scan_screen_lists_each_document() {
        let form = PatientForm {
            passport_scan: Some(DocumentHandle::simulated(DocumentKind::Passport)),
            ..Default::default()
        };

        let text = render_registration(&snapshot(Route::DocumentScan, form));

        assert!(text.contains("passport_scan.jpg"));
        assert!(text.contains("snils"));
    }

    #[test]
    fn completion_shows_the_identifier() {
        let form = PatientForm {
            uip: Uip::Existing("0123456789".to_string()),
            ..Default::default()
        };

        let text = render_registration(&snapshot(Route::RegistrationComplete, form));

        assert!(text.contains("0123456789"));
    }
}
