//! HTML rendering. Page templates are compiled into the binary and loaded
//! into a shared `minijinja` environment at startup.

use std::sync::Arc;

use axum::response::Html;
use minijinja::{Environment, Value};

use crate::errors::AppError;

pub const INDEX: &str = "public/index.html";
pub const VACANCIES: &str = "public/vacancies.html";
pub const COMPANY: &str = "public/company.html";
pub const VACANCY: &str = "vacancies/vacancy.html";
pub const SEND: &str = "vacancies/send.html";
pub const VACANCY_EDIT: &str = "vacancies/vacancy-edit.html";
pub const COMPANY_CREATE: &str = "company/company-create.html";
pub const COMPANY_EDIT: &str = "company/company-edit.html";
pub const COMPANY_VACANCY_LIST: &str = "company/vacancy-list.html";
pub const COMPANY_VACANCY_EDIT: &str = "company/vacancy-edit.html";

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("_vacancy_form.html", include_str!("../templates/_vacancy_form.html")),
    (INDEX, include_str!("../templates/public/index.html")),
    (VACANCIES, include_str!("../templates/public/vacancies.html")),
    (COMPANY, include_str!("../templates/public/company.html")),
    (VACANCY, include_str!("../templates/vacancies/vacancy.html")),
    (SEND, include_str!("../templates/vacancies/send.html")),
    (VACANCY_EDIT, include_str!("../templates/vacancies/vacancy-edit.html")),
    (COMPANY_CREATE, include_str!("../templates/company/company-create.html")),
    (COMPANY_EDIT, include_str!("../templates/company/company-edit.html")),
    (COMPANY_VACANCY_LIST, include_str!("../templates/company/vacancy-list.html")),
    (COMPANY_VACANCY_EDIT, include_str!("../templates/company/vacancy-edit.html")),
];

#[derive(Clone)]
pub struct Templates {
    env: Arc<Environment<'static>>,
}

impl Templates {
    pub fn load() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env: Arc::new(env) })
    }

    pub fn render(&self, name: &str, ctx: Value) -> Result<Html<String>, AppError> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_compile() {
        let templates = Templates::load().expect("templates parse");
        for (name, _) in TEMPLATES {
            assert!(templates.env.get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_send_page_renders_without_context() {
        let templates = Templates::load().unwrap();
        let Html(body) = templates.render(SEND, context! {}).unwrap();
        assert!(body.contains("Отклик отправлен"));
    }

    #[test]
    fn test_output_is_html_escaped() {
        let templates = Templates::load().unwrap();
        let Html(body) = templates
            .render(
                COMPANY_CREATE,
                context! { user => context! { username => "<script>" } },
            )
            .unwrap();
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let templates = Templates::load().unwrap();
        assert!(templates.render("missing.html", context! {}).is_err());
    }
}
