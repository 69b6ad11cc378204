extern crate pagelisp;

const BANNER: &str = "
  1 PAGE LISP

  READ-EVALUATE-PRINT-LOOP

  ...or type ':help' or ':exit'
";

const EXAMPLES: &str = "
Some examples:

> (eq? (+ 4 4)(* 2 4))
#t

> (- (* (* (+ 1 1 1 1)(+ 3 3)) 2) 6)
42

> (define ((double (lambda (x) (+ x x)))) (double 4))
8
";

fn help() -> String {
    format!("{}\nBuiltins: {}\nSpecial forms: define lambda if quote\n",
            EXAMPLES, pagelisp::builtin_names().join(" "))
}

fn evaluate(input: &str) {
    match pagelisp::interpret(input) {
        Ok(value) => println!("{}", value),
        Err(e) => println!("error: {}", e),
    }
}

fn main() -> Result<(), String> {
    if std::env::args().len() > 1 {
        let input = std::env::args().skip(1).collect::<Vec<String>>().join(" ");
        evaluate(&input);
        return Ok(());
    }

    use rustyline::error::ReadlineError;
    let mut rl = rustyline::DefaultEditor::new().map_err(|e| e.to_string())?;
    println!("{}", BANNER);
    loop {
        match rl.readline("> ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(format!("Readline err: {:?}", e)),
            Ok(line) => match line.trim() {
                "" => continue,
                ":exit" => return Ok(()),
                ":help" => println!("{}", help()),
                input => {
                    let _ = rl.add_history_entry(input);
                    evaluate(input);
                }
            },
        }
    }
}
