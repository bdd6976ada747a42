//! Name classification for builder arguments.
//!
//! Both lists are closed: a name is either known or ignored by the builders.

const EVENT_NAMES: &[&str] = &[
    "abort", "afterprint", "animationend", "animationiteration", "animationstart",
    "beforeinput", "beforeprint", "beforeunload", "blur", "canplay", "canplaythrough",
    "change", "click", "contextmenu", "copy", "cut", "dblclick", "drag", "dragend",
    "dragenter", "dragleave", "dragover", "dragstart", "drop", "durationchange", "emptied",
    "ended", "error", "focus", "focusin", "focusout", "fullscreenchange", "fullscreenerror",
    "hashchange", "input", "invalid", "keydown", "keypress", "keyup", "load", "loadeddata",
    "loadedmetadata", "loadstart", "message", "mousedown", "mouseenter", "mouseleave",
    "mousemove", "mouseout", "mouseover", "mouseup", "mousewheel", "offline", "online",
    "open", "pagehide", "pageshow", "paste", "pause", "play", "playing", "pointercancel",
    "pointerdown", "pointerenter", "pointerleave", "pointermove", "pointerout",
    "pointerover", "pointerup", "popstate", "progress", "ratechange", "resize", "reset",
    "scroll", "search", "seeked", "seeking", "select", "show", "stalled", "storage",
    "submit", "suspend", "timeupdate", "toggle", "touchcancel", "touchend", "touchmove",
    "touchstart", "transitionend", "unload", "volumechange", "waiting", "wheel",
];

const ATTRIBUTE_NAMES: &[&str] = &[
    "accept", "accept-charset", "accesskey", "action", "align", "alt", "async",
    "autocomplete", "autofocus", "autoplay", "bgcolor", "border", "charset", "checked",
    "cite", "class", "color", "cols", "colspan", "content", "contenteditable", "controls",
    "coords", "data", "data-*", "datetime", "default", "defer", "dir", "dirname", "disabled",
    "download", "draggable", "enctype", "enterkeyhint", "for", "form", "formaction",
    "headers", "height", "hidden", "high", "href", "hreflang", "http-equiv", "id", "inert",
    "inputmode", "ismap", "kind", "label", "lang", "list", "loop", "low", "max", "maxlength",
    "media", "method", "min", "multiple", "muted", "name", "novalidate", "onabort",
    "onafterprint", "onbeforeprint", "onbeforeunload", "onblur", "oncanplay",
    "oncanplaythrough", "onchange", "onclick", "oncontextmenu", "oncopy", "oncuechange",
    "oncut", "ondblclick", "ondrag", "ondragend", "ondragenter", "ondragleave", "ondragover",
    "ondragstart", "ondrop", "ondurationchange", "onemptied", "onended", "onerror",
    "onfocus", "onhashchange", "oninput", "oninvalid", "onkeydown", "onkeypress", "onkeyup",
    "onload", "onloadeddata", "onloadedmetadata", "onloadstart", "onmousedown",
    "onmousemove", "onmouseout", "onmouseover", "onmouseup", "onmousewheel", "onoffline",
    "ononline", "onpagehide", "onpageshow", "onpaste", "onpause", "onplay", "onplaying",
    "onpopstate", "onprogress", "onratechange", "onreset", "onresize", "onscroll",
    "onsearch", "onseeked", "onseeking", "onselect", "onstalled", "onstorage", "onsubmit",
    "onsuspend", "ontimeupdate", "ontoggle", "onunload", "onvolumechange", "onwaiting",
    "onwheel", "open", "optimum", "pattern", "placeholder", "popover", "popovertarget",
    "popovertargetaction", "poster", "preload", "readonly", "rel", "required", "reversed",
    "rows", "rowspan", "sandbox", "scope", "selected", "shape", "size", "sizes", "span",
    "spellcheck", "src", "srcdoc", "srclang", "srcset", "start", "step", "style", "tabindex",
    "target", "title", "translate", "type", "usemap", "value", "width", "wrap",
];

pub fn is_event_name(name: &str) -> bool {
    EVENT_NAMES.contains(&name)
}

/// Standard attribute names, plus any `data-<suffix>` custom attribute.
pub fn is_attribute_name(name: &str) -> bool {
    name.strip_prefix("data-").is_some_and(|suffix| !suffix.is_empty())
        || ATTRIBUTE_NAMES.contains(&name)
}

/// Elements whose content argument sets the current value instead of markup.
pub fn is_value_field(tag: &str) -> bool {
    matches!(tag, "input" | "textarea" | "select")
}
