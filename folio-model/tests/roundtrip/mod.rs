mod documents;
mod selection;
