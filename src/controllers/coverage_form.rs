use std::rc::Rc;

use log::{debug, error, info};
use serde::Deserialize;

use crate::config::{BANNER_LIFETIME_MS, SUBMIT_DELAY_MS, WHATSAPP_NUMBER};
use crate::dom::surface::Surface;
use crate::dom::web::{listen, WebSurface};
use crate::error::LandingError;

pub const FORM_ID: &str = "coverage-form";
pub const ZIPCODE_ID: &str = "zipcode";
pub const PHONE_ID: &str = "phone";
pub const SUBMIT_SELECTOR: &str = ".submit-btn";

const SENDING_LABEL: &str = r#"<i class="fas fa-spinner fa-spin"></i> Enviando..."#;
pub const SUCCESS_MESSAGE: &str = "Redirecionando para WhatsApp...";

/// Address and contact details typed into the coverage form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoverageRequest {
    pub street: String,
    pub number: String,
    pub zipcode: String,
    pub neighborhood: String,
    pub city: String,
    pub email: String,
    pub phone: String,
}

impl CoverageRequest {
    pub fn to_message(&self) -> String {
        format!(
            "Olá! Gostaria de consultar a cobertura para o seguinte endereço:\n\
             \n\
             📍 *Endereço:*\n\
             Rua: {}\n\
             Número: {}\n\
             CEP: {}\n\
             Bairro: {}\n\
             Cidade: {}\n\
             \n\
             📧 *Contato:*\n\
             E-mail: {}\n\
             Telefone: {}\n\
             \n\
             Aguardo retorno sobre a disponibilidade dos serviços.",
            self.street,
            self.number,
            self.zipcode,
            self.neighborhood,
            self.city,
            self.email,
            self.phone,
        )
    }

    pub fn whatsapp_link(&self) -> String {
        format!(
            "https://wa.me/{}?text={}",
            WHATSAPP_NUMBER,
            urlencoding::encode(&self.to_message())
        )
    }
}

fn digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// `12345678` -> `12345-678`. Digits past the eighth are dropped once the
/// hyphen is inserted.
pub fn format_zipcode(raw: &str) -> String {
    let value = digits(raw);
    if value.len() > 5 {
        let end = value.len().min(8);
        format!("{}-{}", &value[..5], &value[5..end])
    } else {
        value
    }
}

/// Brazilian phone mask: 11 digits as `(DD) DDDDD-DDDD`, 10 digits as
/// `(DD) DDDD-DDDD`, anything else as bare digits.
pub fn format_phone(raw: &str) -> String {
    let value = digits(raw);
    match value.len() {
        11 => format!("({}) {}-{}", &value[..2], &value[2..7], &value[7..]),
        10 => format!("({}) {}-{}", &value[..2], &value[2..6], &value[6..]),
        _ => value,
    }
}

/// A submit that has put the button in its busy state and is waiting for
/// the delay to pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmit {
    pub url: String,
    original_label: String,
}

pub struct CoverageForm<S: Surface> {
    surface: S,
    form: S::Node,
    zipcode: S::Node,
    phone: S::Node,
    submit_btn: S::Node,
}

impl<S: Surface> CoverageForm<S> {
    pub fn new(surface: S) -> Result<Self, LandingError> {
        let form = surface.by_id(FORM_ID)?;
        let zipcode = surface.by_id(ZIPCODE_ID)?;
        let phone = surface.by_id(PHONE_ID)?;
        let submit_btn = surface
            .query_in(&form, SUBMIT_SELECTOR)
            .ok_or_else(|| LandingError::MissingElement(format!("#{} {}", FORM_ID, SUBMIT_SELECTOR)))?;
        Ok(Self {
            surface,
            form,
            zipcode,
            phone,
            submit_btn,
        })
    }

    pub fn on_zipcode_input(&self) {
        let formatted = format_zipcode(&self.surface.value(&self.zipcode));
        self.surface.set_value(&self.zipcode, &formatted);
    }

    pub fn on_phone_input(&self) {
        let formatted = format_phone(&self.surface.value(&self.phone));
        self.surface.set_value(&self.phone, &formatted);
    }

    /// Reads the form, builds the WhatsApp link and shows the spinner.
    pub fn begin_submit(&self) -> Result<PendingSubmit, LandingError> {
        let request: CoverageRequest = self.surface.form_data(&self.form)?;
        debug!("Coverage request for {}, {}", request.street, request.city);

        let original_label = self.surface.inner_html(&self.submit_btn);
        self.surface.set_inner_html(&self.submit_btn, SENDING_LABEL);
        self.surface.set_disabled(&self.submit_btn, true);

        Ok(PendingSubmit {
            url: request.whatsapp_link(),
            original_label,
        })
    }

    /// Opens the link, clears the form and returns the banner to dismiss later.
    pub fn finish_submit(&self, pending: PendingSubmit) -> Result<S::Banner, LandingError> {
        let opened = self.surface.open_in_new_tab(&pending.url);

        self.surface.reset_form(&self.form);
        self.surface.set_inner_html(&self.submit_btn, &pending.original_label);
        self.surface.set_disabled(&self.submit_btn, false);

        opened?;
        info!("Redirected coverage request to WhatsApp");
        self.surface.mount_banner(SUCCESS_MESSAGE)
    }

    /// Full submit: spinner now, redirect after the submit delay, banner
    /// dismissed after its lifetime.
    pub fn submit(form: &Rc<Self>) -> Result<(), LandingError> {
        let pending = form.begin_submit()?;

        let form = Rc::clone(form);
        let surface = form.surface.clone();
        surface.schedule(
            SUBMIT_DELAY_MS,
            Box::new(move || match form.finish_submit(pending) {
                Ok(banner) => {
                    let surface = form.surface.clone();
                    form.surface.schedule(
                        BANNER_LIFETIME_MS,
                        Box::new(move || surface.dismiss_banner(banner)),
                    );
                }
                Err(err) => error!("Failed to finish coverage submit: {}", err),
            }),
        );
        Ok(())
    }
}

pub fn bind(surface: &WebSurface) -> Result<(), LandingError> {
    let form = Rc::new(CoverageForm::new(surface.clone())?);
    let form_node = surface.by_id(FORM_ID)?;
    let zipcode = surface.by_id(ZIPCODE_ID)?;
    let phone = surface.by_id(PHONE_ID)?;

    {
        let form = form.clone();
        listen(&zipcode, "input", move |_| form.on_zipcode_input());
    }
    {
        let form = form.clone();
        listen(&phone, "input", move |_| form.on_phone_input());
    }
    listen(&form_node, "submit", move |event| {
        event.prevent_default();
        if let Err(err) = CoverageForm::submit(&form) {
            error!("Failed to submit coverage form: {}", err);
        }
    });
    Ok(())
}
