use {colored::Colorize, std::fmt::Display};

pub fn success<M>(message: M)
where
    M: Display,
{
    println!("{}", message.to_string().green().bold());
}

pub fn warning<M>(message: M)
where
    M: Display,
{
    eprintln!("{} {message}", "Warning:".yellow().bold());
}

pub fn error<M>(message: M)
where
    M: Display,
{
    eprintln!("{} {message}", "Error:".red().bold());
}
