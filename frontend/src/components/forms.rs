use leptos::*;

const INPUT_CLASS: &str = "mt-1 block w-full rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm text-fg shadow-sm focus:border-action-primary-bg focus:ring-action-primary-focus disabled:opacity-50";

/// `(value, label)` pairs for a `<select>`.
pub type SelectOptions = Vec<(String, String)>;

pub fn options_from<T>(
    items: &[T],
    value: impl Fn(&T) -> String,
    label: impl Fn(&T) -> String,
) -> SelectOptions {
    items.iter().map(|item| (value(item), label(item))).collect()
}

#[component]
fn FieldLabel(#[prop(into)] label: String, required: bool) -> impl IntoView {
    view! {
        <label class="block text-sm font-medium text-fg-muted">
            {label}
            {required.then(|| view! { <span class="text-status-error-text">" *"</span> })}
        </label>
    }
}

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional, into)] input_type: Option<String>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    let input_type = input_type.unwrap_or_else(|| "text".to_string());
    view! {
        <div>
            <FieldLabel label=label required=required />
            <input
                type=input_type
                class=INPUT_CLASS
                placeholder=placeholder
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional)] required: bool,
    #[prop(default = 3)] rows: u32,
) -> impl IntoView {
    view! {
        <div>
            <FieldLabel label=label required=required />
            <textarea
                rows=rows
                class=INPUT_CLASS
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
        </div>
    }
}

/// Numbers stay text while edited so partial input like `7.` survives.
#[component]
pub fn NumberField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional)] required: bool,
    #[prop(default = "any")] step: &'static str,
    #[prop(optional)] min: Option<f64>,
    #[prop(optional)] max: Option<f64>,
) -> impl IntoView {
    view! {
        <div>
            <FieldLabel label=label required=required />
            <input
                type="number"
                step=step
                min=min.map(|m| m.to_string())
                max=max.map(|m| m.to_string())
                class=INPUT_CLASS
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into)] options: Signal<SelectOptions>,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let placeholder = placeholder.unwrap_or_else(|| "Seleccione...".to_string());
    view! {
        <div>
            <FieldLabel label=label required=required />
            <select
                class=INPUT_CLASS
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="">{placeholder}</option>
                {move || {
                    let selected = value.get();
                    options
                        .get()
                        .into_iter()
                        .map(|(key, text)| {
                            let is_selected = key == selected;
                            view! { <option value=key selected=is_selected>{text}</option> }
                        })
                        .collect_view()
                }}
            </select>
        </div>
    }
}

#[component]
pub fn CheckboxField(#[prop(into)] label: String, checked: RwSignal<bool>) -> impl IntoView {
    view! {
        <label class="inline-flex items-center gap-2 text-sm text-fg">
            <input
                type="checkbox"
                class="rounded border-form-control-border"
                prop:checked=move || checked.get()
                on:change=move |ev| checked.set(event_target_checked(&ev))
            />
            {label}
        </label>
    }
}

/// Adds or removes `id` from a multi-select, keeping insertion order.
pub fn toggle_id(selected: &mut Vec<i64>, id: i64, checked: bool) {
    let present = selected.contains(&id);
    if checked && !present {
        selected.push(id);
    } else if !checked && present {
        selected.retain(|existing| *existing != id);
    }
}

/// A checkbox per option, bound to the list of selected ids.
#[component]
pub fn CheckboxGroup(
    #[prop(into)] label: String,
    #[prop(into)] options: Signal<Vec<(i64, String)>>,
    selected: RwSignal<Vec<i64>>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <fieldset>
            <FieldLabel label=label required=required />
            <div class="mt-2 grid grid-cols-1 sm:grid-cols-2 gap-2">
                {move || {
                    options
                        .get()
                        .into_iter()
                        .map(|(id, text)| {
                            let is_checked = selected.with(|ids| ids.contains(&id));
                            view! {
                                <label class="inline-flex items-center gap-2 text-sm text-fg">
                                    <input
                                        type="checkbox"
                                        class="rounded border-form-control-border"
                                        checked=is_checked
                                        on:change=move |ev| {
                                            let checked = event_target_checked(&ev);
                                            selected.update(|ids| toggle_id(ids, id, checked));
                                        }
                                    />
                                    {text}
                                </label>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </fieldset>
    }
}
