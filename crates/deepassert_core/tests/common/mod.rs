#![allow(dead_code)]

use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use deepassert_core::FieldPath;
use deepassert_reflect::{Field, Reflect, Shape, Struct, reflect_struct};

pub fn rendered(paths: &[FieldPath]) -> Vec<String> {
    paths.iter().map(FieldPath::render).collect()
}

pub fn always_fail(_: &deepassert_reflect::Value) -> bool {
    false
}

// Top -> Middle -> Bottom -> Top

pub struct Top {
    pub link_to_middle: Rc<Middle>,
}

pub struct Middle {
    pub link_to_bottom: Rc<Bottom>,
}

pub struct Bottom {
    pub loop_back_to_top: Weak<Top>,
}

reflect_struct!(Top { link_to_middle });
reflect_struct!(Middle { link_to_bottom });

impl Reflect for Bottom {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(self)
    }
}

impl Struct for Bottom {
    fn fields(&self) -> Vec<Field> {
        vec![Field::weak("loop_back_to_top", &self.loop_back_to_top)]
    }
}

pub fn three_hop_cycle() -> Rc<Top> {
    Rc::new_cyclic(|top| Top {
        link_to_middle: Rc::new(Middle {
            link_to_bottom: Rc::new(Bottom {
                loop_back_to_top: top.clone(),
            }),
        }),
    })
}

// Two nodes pointing at each other.

pub struct Node {
    pub name: String,
    pub next: OnceCell<Rc<Node>>,
}

reflect_struct!(Node { name, next });

pub fn two_node_ring() -> (Rc<Node>, Rc<Node>) {
    let first = Rc::new(Node {
        name: "first".into(),
        next: OnceCell::new(),
    });
    let second = Rc::new(Node {
        name: "second".into(),
        next: OnceCell::new(),
    });
    let _ = first.next.set(Rc::clone(&second));
    let _ = second.next.set(Rc::clone(&first));
    (first, second)
}

// Authors and books referencing each other.

pub struct Library {
    pub books: Vec<Rc<Book>>,
}

reflect_struct!(Library { books });

pub struct Book {
    pub title: String,
    pub authors: RefCell<Vec<Rc<Author>>>,
}

impl Reflect for Book {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(self)
    }
}

impl Struct for Book {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::of("title", &self.title),
            Field::borrowed("authors", &self.authors),
        ]
    }
}

pub struct Author {
    pub name: String,
    pub email: Option<String>,
    pub books: RefCell<Vec<Rc<Book>>>,
}

impl Reflect for Author {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(self)
    }
}

impl Struct for Author {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::of("name", &self.name),
            Field::nullable("email", self.email.as_ref()),
            Field::borrowed("books", &self.books),
        ]
    }
}

fn book(title: &str) -> Rc<Book> {
    Rc::new(Book {
        title: title.into(),
        authors: RefCell::new(Vec::new()),
    })
}

fn author(name: &str, email: Option<&str>) -> Rc<Author> {
    Rc::new(Author {
        name: name.into(),
        email: email.map(str::to_string),
        books: RefCell::new(Vec::new()),
    })
}

fn link(book: &Rc<Book>, author: &Rc<Author>) {
    book.authors.borrow_mut().push(Rc::clone(author));
    author.books.borrow_mut().push(Rc::clone(book));
}

/// Two books sharing an author; the co-author of the second book has no
/// email.
pub fn library() -> Library {
    let refactoring = book("Refactoring");
    let patterns = book("Patterns of Enterprise Application Architecture");

    let kent = author("Kent Beck", Some("kent@example.com"));
    let martin = author("Martin Fowler", Some("martin@example.com"));
    let david = author("David Rice", None);

    link(&refactoring, &kent);
    link(&refactoring, &martin);
    link(&patterns, &martin);
    link(&patterns, &david);

    Library {
        books: vec![refactoring, patterns],
    }
}

/// Breaks the reference cycles of a [`library`] so it can be dropped.
pub fn unlink(library: &Library) {
    for book in &library.books {
        for author in book.authors.borrow_mut().drain(..) {
            author.books.borrow_mut().clear();
        }
    }
}
