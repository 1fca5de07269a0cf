use crate::{
    auth::LOGIN_PATH,
    data::student::{FieldKind, StudentDetails},
    routes::{DASHBOARD_PATH, ENROLLMENT_FORM_PATH},
};
use maud::{Markup, Render, html};

pub fn render_table<const N: usize>(
    overall_title: &'static str,
    titles: [&'static str; N],
    items: Vec<[Markup; N]>,
) -> Markup {
    html! {
        div class="container mx-auto" {
            (title(overall_title))
            div class="overflow-x-auto" {
                table class="min-w-full bg-gray-800 rounded shadow-md" {
                    thead class="bg-gray-700" {
                        tr {
                            @for title in titles {
                                th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                            }
                        }
                    }
                    tbody {
                        @for row in items {
                            tr {
                                @for col in row {
                                    td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn link_button(href: &str, text: &str) -> Markup {
    html! {
        a href=(href) class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {(text)}
    }
}

pub fn form_element(id: &str, label: &str, input: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (input)
        }
    }
}

pub fn simple_form_element(
    id: &str,
    label: &str,
    required: bool,
    ty: Option<&str>,
    value: Option<&str>,
) -> Markup {
    form_element(
        id,
        label,
        html! {
            input required[required] type=(ty.unwrap_or("text")) id=(id) name=(id) value=[value] class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {}
        },
    )
}

pub fn form_submit_button(text: Option<&str>) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text.unwrap_or("Submit"))
            }
        }
    }
}

/// The eleven enrollment fields, blank for a new student or pre-filled when editing.
pub fn student_form(action: &str, details: Option<&StudentDetails>, submit_text: &str) -> Markup {
    let blank = StudentDetails::default();
    let details = details.unwrap_or(&blank);

    html! {
        form method="post" action=(action) class="p-4 grid grid-cols-1 md:grid-cols-2 gap-x-4" {
            @for field in details.fields() {
                @let required = field.name != "comments";
                @match field.kind {
                    FieldKind::LongText => {
                        (form_element(field.name, field.label, html! {
                            textarea required[required] id=(field.name) name=(field.name) rows="2" class="w-full bg-gray-700 text-gray-100 rounded px-4 py-2 border border-gray-600 focus:outline-none focus:ring focus:ring-blue-500 resize-y" {(field.value)}
                        }))
                    }
                    FieldKind::Email => { (simple_form_element(field.name, field.label, required, Some("email"), Some(field.value))) }
                    FieldKind::Phone => { (simple_form_element(field.name, field.label, required, Some("tel"), Some(field.value))) }
                    FieldKind::Text => { (simple_form_element(field.name, field.label, required, None, Some(field.value))) }
                }
            }
            (form_submit_button(Some(submit_text)))
        }
    }
}

pub fn render_nav(logged_in: bool) -> Markup {
    html! {
        nav class="w-full flex flex-row justify-center space-x-4 p-4 mb-4 bg-gray-800" {
            a href="/" class="hover:text-blue-300" {"Home"}
            a href=(ENROLLMENT_FORM_PATH) class="hover:text-blue-300" {"Enroll"}
            @if logged_in {
                a href=(DASHBOARD_PATH) class="hover:text-blue-300" {"Dashboard"}
                a href="/admin/logout" class="hover:text-blue-300" {"Logout"}
            } @else {
                a href=(LOGIN_PATH) class="hover:text-blue-300" {"Admin Login"}
            }
        }
    }
}

pub fn render_flashes(messages: &[String]) -> Markup {
    html! {
        @for message in messages {
            div role="alert" class="flash bg-blue-100 border border-blue-400 text-blue-700 px-4 py-3 rounded relative mb-4 max-w-md w-full" {
                span class="block sm:inline" {(message)}
            }
        }
    }
}
