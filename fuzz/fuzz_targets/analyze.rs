#![no_main]

use javelin::analyzer::Analyzer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // Split the input into a submission and a template at the first NUL
    let (submission, template) = match s.split_once('\0') {
        Some((submission, template)) => (submission, Some(template)),
        None => (s, None),
    };
    let analyzer = match template {
        Some(template) => Analyzer::with_template(submission, template),
        None => Analyzer::new(submission),
    };
    let Ok(mut analyzer) = analyzer else {
        return;
    };
    if let Ok(result) = analyzer.analyze_user_code() {
        let _ = analyzer.functions_visible_from(result.entry_scope);
        let _ = analyzer.variables_visible_from(result.entry_scope);
        let _ = analyzer.resolve_function_call(result.entry_scope, &["main"]);
    }
});
