use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::movie,
    models::{ALLOWED_RATINGS, MovieForm, ValidationErrors},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn home_page() -> String {
    page(
        "Film Shelf",
        html! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Film Shelf" }
                    p class="mt-2 text-gray-600" { "A catalog of the family movie collection: what we own, who borrowed it, and whether it's the edited cut." }

                    div class="mt-8 flex gap-4" {
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/Movies" { "View the collection" }
                        a class="rounded-md border border-gray-300 px-4 py-2 font-semibold text-gray-700 hover:bg-gray-100" href="/Movies/Add" { "Add a movie" }
                    }
                }
            }
        },
    )
}

pub fn about_page() -> String {
    page(
        "About",
        html! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "About this collection" }
                    p class="mt-4 text-gray-600" { "Film Shelf keeps track of a single household's movies. Every title on the shelf gets an entry with its category, release year, director, and rating." }
                    p class="mt-4 text-gray-600" { "Movies sometimes leave the shelf; the \"Lent To\" field remembers who has them. The notes field is deliberately short. If it doesn't fit in 25 characters, it belongs in a conversation, not a catalog." }
                }
            }
        },
    )
}

pub fn error_page(request_id: Option<&str>) -> String {
    page(
        "Error",
        html! {
            div class="max-w-xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-2xl font-bold text-gray-900" { "Error" }
                    p class="mt-4 text-gray-700" { "An unexpected error occurred while processing your request." }
                    @if let Some(id) = request_id {
                        p class="mt-2 text-sm text-gray-500" { "Request ID: " code class="font-mono" { (id) } }
                    }
                    a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back to home" }
                }
            }
        },
    )
}

pub fn collection_page(movies: &[movie::Model], notice: Option<&str>) -> String {
    page(
        "Movie Collection",
        html! {
            div class="max-w-5xl mx-auto px-6 py-10" {
                @if let Some(notice) = notice {
                    div class="mb-6 rounded-md border border-green-200 bg-green-50 p-4 text-green-800" { (notice) }
                }

                div class="flex items-start justify-between gap-6" {
                    h1 class="text-3xl font-bold text-gray-900" { "Movie Collection" }
                    a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/Movies/Add" { "Add Movie" }
                }

                @if movies.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "No movies in the collection yet." }
                    }
                } @else {
                    div class="mt-8 overflow-x-auto rounded-lg bg-white shadow" {
                        table class="min-w-full divide-y divide-gray-200" {
                            thead class="bg-gray-50" {
                                tr {
                                    (header_cell("Title"))
                                    (header_cell("Category"))
                                    (header_cell("Year"))
                                    (header_cell("Director"))
                                    (header_cell("Rating"))
                                    (header_cell("Edited"))
                                    (header_cell("Lent To"))
                                    (header_cell("Notes"))
                                }
                            }
                            tbody class="divide-y divide-gray-200" {
                                @for movie in movies {
                                    (movie_row(movie))
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_movie_page(form: &MovieForm, errors: &ValidationErrors, token: &str) -> String {
    page(
        "Add Movie",
        html! {
            div class="max-w-2xl mx-auto px-6 py-10" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Add a movie" }
                    p class="mt-2 text-gray-600" { "New additions show up in the collection sorted by title." }

                    @if !errors.is_empty() {
                        div class="mt-6 rounded-md border border-red-200 bg-red-50 p-4" {
                            p class="font-medium text-red-800" { "The movie couldn't be added:" }
                            ul class="mt-2 list-disc pl-5 text-sm text-red-700" {
                                @for (_, messages) in errors.fields() {
                                    @for message in messages {
                                        li { (message) }
                                    }
                                }
                            }
                        }
                    }

                    form class="mt-8 space-y-6" method="post" action="/Movies/Add" {
                        input type="hidden" name="csrf_token" value=(token);

                        (text_field("Category", "category", &form.category, errors))
                        (text_field("Title", "title", &form.title, errors))

                        div {
                            label class="block text-sm font-medium text-gray-700" for="year" { "Year" }
                            input class=(input_classes("year", errors)) type="number" name="year" id="year" value=(form.year);
                            (field_errors("year", errors))
                        }

                        (text_field("Director", "director", &form.director, errors))

                        div {
                            label class="block text-sm font-medium text-gray-700" for="rating" { "Rating" }
                            select class=(input_classes("rating", errors)) name="rating" id="rating" {
                                option value="" selected[form.rating.is_empty()] { "Select a rating" }
                                @for rating in ALLOWED_RATINGS {
                                    option value=(rating) selected[form.rating == *rating] { (rating) }
                                }
                            }
                            (field_errors("rating", errors))
                        }

                        div class="flex items-center gap-2" {
                            input class="h-4 w-4 rounded border-gray-300" type="checkbox" name="edited" id="edited" value="true" checked[form.is_edited()];
                            label class="text-sm font-medium text-gray-700" for="edited" { "Edited version" }
                        }

                        (text_field("Lent To", "lent_to", &form.lent_to, errors))
                        (text_field("Notes", "notes", &form.notes, errors))

                        button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Add Movie" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                (nav())
                (body)
            }
        }
    }
    .into_string()
}

fn nav() -> Markup {
    html! {
        nav class="border-b border-gray-200 bg-white" {
            div class="max-w-5xl mx-auto flex items-center gap-6 px-6 py-4" {
                a class="font-semibold text-gray-900" href="/" { "Film Shelf" }
                a class="text-sm text-gray-600 hover:text-gray-900" href="/Home/About" { "About" }
                a class="text-sm text-gray-600 hover:text-gray-900" href="/Movies" { "View Collection" }
                a class="text-sm text-gray-600 hover:text-gray-900" href="/Movies/Add" { "Add Movie" }
            }
        }
    }
}

fn header_cell(label: &str) -> Markup {
    html! {
        th class="px-4 py-3 text-left text-xs font-semibold uppercase tracking-wide text-gray-500" { (label) }
    }
}

fn movie_row(movie: &movie::Model) -> Markup {
    html! {
        tr {
            td class="px-4 py-3 font-medium text-gray-900" { (movie.title) }
            td class="px-4 py-3 text-gray-700" { (movie.category) }
            td class="px-4 py-3 text-gray-700" { (movie.year) }
            td class="px-4 py-3 text-gray-700" { (movie.director) }
            td class="px-4 py-3 text-gray-700" { (movie.rating) }
            td class="px-4 py-3 text-gray-700" {
                @if movie.edited { "Yes" } @else { "No" }
            }
            td class="px-4 py-3 text-gray-700" { (movie.lent_to.as_deref().unwrap_or("—")) }
            td class="px-4 py-3 text-gray-700" { (movie.notes.as_deref().unwrap_or("—")) }
        }
    }
}

fn text_field(label: &str, name: &str, value: &str, errors: &ValidationErrors) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            input class=(input_classes(name, errors)) type="text" name=(name) id=(name) value=(value);
            (field_errors(name, errors))
        }
    }
}

fn field_errors(name: &str, errors: &ValidationErrors) -> Markup {
    html! {
        @for message in errors.field(name) {
            p class="mt-1 text-sm text-red-600" { (message) }
        }
    }
}

fn input_classes(name: &str, errors: &ValidationErrors) -> String {
    let border = if errors.field(name).is_empty() { "border-gray-300" } else { "border-red-400" };
    format!(
        "mt-2 w-full rounded-md border {} px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500",
        border
    )
}
